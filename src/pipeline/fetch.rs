// The seam between the pipeline and the external dataset downloader.

use crate::pipeline::*;

pub const IDEAL_POINTS_FILE: &str = "idealpoints.tab";
pub const RAW_VOTES_FILE: &str = "rawvotingdata13.tab";
pub const DESCRIPTIONS_FILE: &str = "descriptions.xls";

/// The worksheet of the description spreadsheet holding the data.
pub const DESCRIPTIONS_WORKSHEET: &str = "descriptions";

// Erik Voeten's United Nations General Assembly voting data.
const DATASET_PAGE: &str =
    "https://dataverse.harvard.edu/dataset.xhtml?persistentId=hdl:1902.1/12379";

/// The source URI for every local file name the pipeline expects.
pub fn source_urls() -> Vec<(&'static str, &'static str)> {
    vec![
        (IDEAL_POINTS_FILE, DATASET_PAGE),
        (RAW_VOTES_FILE, DATASET_PAGE),
        (DESCRIPTIONS_FILE, DATASET_PAGE),
    ]
}

/// The resolved local paths of the three inputs.
pub struct InputPaths {
    pub ideal_points: PathBuf,
    pub raw_votes: PathBuf,
    pub descriptions: PathBuf,
}

/// Retrieves one source file and persists it at the given path.
///
/// Downloading is an external concern: the pipeline only requires the files to
/// end up on disk before it starts reading.
pub trait SourceFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> PipelineResult<()>;
}

/// The default collaborator. It has no network access: a missing file is
/// reported together with the address it can be retrieved from.
pub struct ManualFetcher {}

impl SourceFetcher for ManualFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> PipelineResult<()> {
        MissingInputSnafu {
            path: dest.display().to_string(),
            url,
        }
        .fail()
    }
}

/// Resolves the three input paths inside the data directory, delegating any
/// missing file to the fetcher. Runs before anything is read or written, so a
/// missing input aborts without producing a partial output file.
pub fn ensure_local_inputs(
    data_dir: &Path,
    fetcher: &dyn SourceFetcher,
) -> PipelineResult<InputPaths> {
    for (fname, url) in source_urls() {
        let dest = data_dir.join(fname);
        if !dest.is_file() {
            info!(
                "ensure_local_inputs: {:?} not present, fetching from {:?}",
                dest, url
            );
            fetcher.fetch(url, &dest)?;
        }
    }
    Ok(InputPaths {
        ideal_points: data_dir.join(IDEAL_POINTS_FILE),
        raw_votes: data_dir.join(RAW_VOTES_FILE),
        descriptions: data_dir.join(DESCRIPTIONS_FILE),
    })
}
