//! Fork-join checksum validation over a directory of captured segments.
//!
//! A case `i` is a pair of files in the data directory:
//!
//! - `tcp_addrs_{i}.txt`: source and destination IPv4 addresses, separated
//!   by whitespace
//! - `tcp_data_{i}.dat`: the raw TCP segment
//!
//! Every case runs in its own task. A case that is missing, unreadable, or
//! malformed produces an error outcome for that case only; the rest of the
//! batch is unaffected.

use std::{
    fmt,
    net::Ipv4Addr,
    path::{Path, PathBuf},
    sync::Arc,
};

use framecheck_proto::{ValidationResult, validate};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::error::CaseError;

/// Index of a case within a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CaseId(pub u32);

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where to find cases and how many to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Directory holding the case files
    pub data_dir: PathBuf,
    /// Cases `0..case_count` are run
    pub case_count: u32,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { data_dir: PathBuf::from("testdata"), case_count: 10 }
    }
}

impl BatchConfig {
    /// Ids of every case in the batch, in order.
    pub fn case_ids(&self) -> impl Iterator<Item = CaseId> + use<> {
        (0..self.case_count).map(CaseId)
    }
}

/// Paths of the two files that make up one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseFiles {
    /// Case these files belong to
    pub id: CaseId,
    /// Address file (`tcp_addrs_{i}.txt`)
    pub addresses: PathBuf,
    /// Segment file (`tcp_data_{i}.dat`)
    pub segment: PathBuf,
}

impl CaseFiles {
    /// Paths for case `id` under `dir`, without touching the filesystem.
    pub fn paths(dir: &Path, id: CaseId) -> Self {
        Self {
            id,
            addresses: dir.join(format!("tcp_addrs_{id}.txt")),
            segment: dir.join(format!("tcp_data_{id}.dat")),
        }
    }

    /// Locate case `id` under `dir`.
    ///
    /// # Errors
    ///
    /// - [`CaseError::MissingFiles`] naming the first absent file
    /// - [`CaseError::Io`] if existence cannot be determined
    pub async fn locate(dir: &Path, id: CaseId) -> Result<Self, CaseError> {
        let files = Self::paths(dir, id);

        for path in [&files.addresses, &files.segment] {
            let exists = tokio::fs::try_exists(path)
                .await
                .map_err(|e| CaseError::Io { path: path.clone(), reason: e.to_string() })?;

            if !exists {
                return Err(CaseError::MissingFiles { case: id, path: path.clone() });
            }
        }

        Ok(files)
    }
}

/// Loaded contents of one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseInput {
    /// Case id
    pub id: CaseId,
    /// Segment sender
    pub source: Ipv4Addr,
    /// Segment receiver
    pub destination: Ipv4Addr,
    /// Raw segment bytes, checksum field included
    pub segment: Vec<u8>,
}

/// Parse an address file: exactly two whitespace-separated dotted quads.
///
/// # Errors
///
/// - [`CaseError::AddressCount`] if there are not exactly two fields
/// - [`CaseError::MalformedAddress`] if a field is not an IPv4 address
pub fn parse_addresses(text: &str) -> Result<(Ipv4Addr, Ipv4Addr), CaseError> {
    let fields: Vec<&str> = text.split_whitespace().collect();

    let &[source, destination] = fields.as_slice() else {
        return Err(CaseError::AddressCount { found: fields.len() });
    };

    let parse = |field: &str| {
        field.parse::<Ipv4Addr>().map_err(|_| CaseError::MalformedAddress { input: field.to_string() })
    };

    Ok((parse(source)?, parse(destination)?))
}

/// Read and parse both files of a case.
///
/// # Errors
///
/// [`CaseError::Io`] if a file cannot be read, or any error from
/// [`parse_addresses`].
pub async fn load_case(files: &CaseFiles) -> Result<CaseInput, CaseError> {
    let text = tokio::fs::read_to_string(&files.addresses)
        .await
        .map_err(|e| CaseError::Io { path: files.addresses.clone(), reason: e.to_string() })?;
    let (source, destination) = parse_addresses(&text)?;

    let segment = tokio::fs::read(&files.segment)
        .await
        .map_err(|e| CaseError::Io { path: files.segment.clone(), reason: e.to_string() })?;

    Ok(CaseInput { id: files.id, source, destination, segment })
}

/// Result of one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseOutcome {
    /// Case id
    pub id: CaseId,
    /// Checksum comparison, or why the case could not be checked
    pub result: Result<ValidationResult, CaseError>,
}

impl CaseOutcome {
    /// Checksum matched
    pub fn passed(&self) -> bool {
        matches!(&self.result, Ok(r) if r.passed())
    }

    /// Checksum was computed and did not match
    pub fn failed(&self) -> bool {
        matches!(&self.result, Ok(r) if !r.passed())
    }

    /// Case could not be checked
    pub fn errored(&self) -> bool {
        self.result.is_err()
    }
}

impl fmt::Display for CaseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            Ok(result) => write!(f, "FileSet {}: {result}", self.id),
            Err(e) => write!(f, "FileSet {}: ERROR ({e})", self.id),
        }
    }
}

/// Locate, load, and validate one case.
///
/// Never fails: every error is captured in the outcome.
pub async fn run_case(dir: &Path, id: CaseId) -> CaseOutcome {
    let result = check_case(dir, id).await;

    match &result {
        Ok(r) => info!(case = %id, passed = r.passed(), original = r.original, computed = r.computed, "case checked"),
        Err(e) => warn!(case = %id, error = %e, "case could not be checked"),
    }

    CaseOutcome { id, result }
}

async fn check_case(dir: &Path, id: CaseId) -> Result<ValidationResult, CaseError> {
    let files = CaseFiles::locate(dir, id).await?;
    let input = load_case(&files).await?;
    debug!(case = %id, len = input.segment.len(), src = %input.source, dst = %input.destination, "case loaded");

    Ok(validate(&input.segment, input.source, input.destination)?)
}

/// Outcomes of a whole batch, ordered by case id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// One outcome per case
    pub outcomes: Vec<CaseOutcome>,
}

impl BatchReport {
    /// Cases whose checksum matched
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    /// Cases whose checksum did not match
    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.failed()).count()
    }

    /// Cases that could not be checked
    pub fn errored(&self) -> usize {
        self.outcomes.iter().filter(|o| o.errored()).count()
    }

    /// True when every case passed
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(CaseOutcome::passed)
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            writeln!(f, "{outcome}")?;
        }
        write!(
            f,
            "Processing complete: {} passed, {} failed, {} errors",
            self.passed(),
            self.failed(),
            self.errored()
        )
    }
}

/// Run every case concurrently and wait for all of them.
///
/// One task per case. The report is only built after every task has been
/// joined. A task that panics is recorded as [`CaseError::TaskFailed`] for
/// its own case.
pub async fn run_batch(config: &BatchConfig) -> BatchReport {
    let dir: Arc<Path> = Arc::from(config.data_dir.as_path());
    let mut tasks = JoinSet::new();

    for id in config.case_ids() {
        let dir = Arc::clone(&dir);
        tasks.spawn(async move { run_case(&dir, id).await });
    }

    let mut outcomes = Vec::with_capacity(config.case_count as usize);
    let mut join_failures = Vec::new();

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => {
                warn!(error = %e, "case task did not complete");
                join_failures.push(e.to_string());
            },
        }
    }

    // Join errors do not carry the case id; anything unaccounted for failed.
    if !join_failures.is_empty() {
        let reason = join_failures.join("; ");
        for id in config.case_ids() {
            if !outcomes.iter().any(|o| o.id == id) {
                outcomes.push(CaseOutcome { id, result: Err(CaseError::TaskFailed { reason: reason.clone() }) });
            }
        }
    }

    outcomes.sort_by_key(|o| o.id);

    let report = BatchReport { outcomes };
    info!(
        passed = report.passed(),
        failed = report.failed(),
        errors = report.errored(),
        "batch complete"
    );
    report
}
