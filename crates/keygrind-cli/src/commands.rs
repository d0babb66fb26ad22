//! CLI command implementations.

use crate::progress::ConsoleProgressReporter;
use anyhow::{bail, Context, Result};
use keygrind_identity::{read_keypair_file, write_keypair_file, Keypair, PublicKey, Signature};
use keygrind_search::{
    difficulty, ParallelSearch, Pattern, SearchConfig, SearchOutcome, SeededKeySource,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

/// Exit status when a bounded search ends without a match.
pub const EXIT_NOT_FOUND: u8 = 2;

/// Message signed by `verify`.
const VERIFY_MESSAGE: &[u8] = b"keygrind verify";

/// Resolved options for `grind`.
#[derive(Debug, Clone, Default)]
pub struct GrindOptions {
    /// Required leading characters.
    pub starts_with: Option<String>,
    /// Required trailing characters.
    pub ends_with: Option<String>,
    /// Attempt budget.
    pub max_attempts: Option<u64>,
    /// Attempts between progress updates.
    pub progress_interval: u64,
    /// Worker threads.
    pub workers: usize,
    /// Wall-clock limit.
    pub timeout: Option<Duration>,
    /// Explicit keypair file.
    pub outfile: Option<PathBuf>,
    /// Directory for `<address>.json` when no outfile is given.
    pub output_dir: Option<PathBuf>,
    /// Do not write a keypair file.
    pub no_outfile: bool,
    /// Replace an existing keypair file.
    pub force: bool,
    /// Print the base58 secret to stdout.
    pub print_secret: bool,
    /// Reproducible (insecure) key source.
    pub seed: Option<u64>,
    /// Draw a spinner on stderr.
    pub show_spinner: bool,
    /// Print a JSON report instead of text.
    pub json: bool,
}

/// `grind --json` output.
#[derive(Debug, Serialize)]
struct GrindReport<'a> {
    pattern: &'a Pattern,
    found: bool,
    attempts: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    public_key: Option<PublicKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    elapsed_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    worker: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    keyfile: Option<&'a Path>,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret_key: Option<&'a str>,
}

/// `verify --json` output.
#[derive(Debug, Serialize)]
struct VerifyReport {
    public_key: PublicKey,
    signature: Signature,
    verified: bool,
}

/// Search for a keypair matching the requested pattern.
///
/// Everything that can be rejected up front is rejected before the search
/// starts. If the keyfile cannot be written afterwards, the secret is printed
/// before the error is returned.
pub fn grind(opts: &GrindOptions) -> Result<ExitCode> {
    if opts.no_outfile && !opts.print_secret {
        bail!("--no-outfile without --print-secret would discard the key");
    }
    if let Some(path) = opts.outfile.as_deref().filter(|p| !opts.force && p.exists()) {
        bail!("{} already exists; pass --force to overwrite it", path.display());
    }

    let workers = match opts.seed {
        Some(_) if opts.workers > 1 => {
            tracing::warn!(
                requested = opts.workers,
                "Seeded search runs on a single worker to stay reproducible"
            );
            1
        }
        _ => opts.workers,
    };

    let pattern = Pattern::from_parts(opts.starts_with.as_deref(), opts.ends_with.as_deref());
    let config = SearchConfig::new(pattern)
        .with_max_attempts(opts.max_attempts)
        .with_progress_interval(opts.progress_interval)
        .with_workers(workers)
        .with_timeout(opts.timeout);
    let search = ParallelSearch::new(config)?;
    let pattern = &search.config().pattern;

    tracing::info!(
        %pattern,
        workers,
        expected_attempts = difficulty::expected_attempts(pattern),
        "Searching for keypair"
    );

    let reporter = ConsoleProgressReporter::new(opts.show_spinner);
    let outcome = match opts.seed {
        Some(seed) => {
            tracing::warn!(seed, "Seeded key source: the resulting key is reproducible and NOT secret");
            search.run(|worker| SeededKeySource::for_worker(seed, worker), &reporter)
        }
        None => search.run(|_| keygrind_search::OsKeySource, &reporter),
    };

    let result = match outcome {
        SearchOutcome::Found(result) => result,
        SearchOutcome::NotFound { attempts, reason } => {
            if opts.json {
                print_json(&GrindReport {
                    pattern,
                    found: false,
                    attempts,
                    public_key: None,
                    elapsed_ms: None,
                    worker: None,
                    reason: Some(reason.to_string()),
                    keyfile: None,
                    secret_key: None,
                })?;
            } else {
                println!("No matching key found after {attempts} attempts ({reason}).");
            }
            return Ok(ExitCode::from(EXIT_NOT_FOUND));
        }
    };

    let keyfile = (!opts.no_outfile).then(|| {
        opts.outfile.clone().unwrap_or_else(|| {
            opts.output_dir
                .clone()
                .unwrap_or_default()
                .join(format!("{}.json", result.address))
        })
    });
    let written = match &keyfile {
        Some(path) => write_keypair_file(path, &result.keypair, opts.force)
            .with_context(|| format!("failed to write keypair to {}", path.display())),
        None => Ok(()),
    };
    let secret = (opts.print_secret || written.is_err()).then(|| result.keypair.to_base58_string());

    if opts.json {
        print_json(&GrindReport {
            pattern,
            found: true,
            attempts: result.attempts,
            public_key: Some(result.keypair.public_key()),
            elapsed_ms: Some(u64::try_from(result.elapsed.as_millis()).unwrap_or(u64::MAX)),
            worker: Some(result.worker),
            reason: None,
            keyfile: keyfile.as_deref().filter(|_| written.is_ok()),
            secret_key: secret.as_ref().map(|s| s.as_str()),
        })?;
    } else {
        println!("Found matching key after {} attempts!", result.attempts);
        println!("Public Key: {}", result.address);
        if let Some(secret) = &secret {
            println!("Private Key (Base58): {}", secret.as_str());
        }
        if let (Some(path), Ok(())) = (&keyfile, &written) {
            println!("Wrote keypair to {}", path.display());
        }
    }

    written?;
    Ok(ExitCode::SUCCESS)
}

/// Generate a single keypair.
pub fn new_keypair(outfile: Option<&Path>, force: bool, print_secret: bool) -> Result<ExitCode> {
    if outfile.is_none() && !print_secret {
        bail!("pass --outfile or --print-secret, otherwise the key is discarded");
    }

    let keypair = Keypair::generate();
    println!("Public Key: {}", keypair.public_key());

    if print_secret {
        println!("Private Key (Base58): {}", keypair.to_base58_string().as_str());
    }
    if let Some(path) = outfile {
        write_keypair(path, &keypair, force)?;
    }

    Ok(ExitCode::SUCCESS)
}

/// Print the address stored in a keypair file.
pub fn pubkey(keyfile: &Path) -> Result<ExitCode> {
    let keypair = read_keypair_file(keyfile)
        .with_context(|| format!("failed to read keypair from {}", keyfile.display()))?;
    println!("{}", keypair.public_key());
    Ok(ExitCode::SUCCESS)
}

/// Check that a keypair file holds the secret for `address`.
pub fn verify(address: &str, keyfile: &Path, json: bool) -> Result<ExitCode> {
    let expected: PublicKey = address
        .parse()
        .with_context(|| format!("invalid address {address}"))?;
    let keypair = read_keypair_file(keyfile)
        .with_context(|| format!("failed to read keypair from {}", keyfile.display()))?;

    let signature = keypair.sign(VERIFY_MESSAGE);
    let verified =
        keypair.public_key() == expected && expected.verify(VERIFY_MESSAGE, &signature).is_ok();

    if json {
        print_json(&VerifyReport {
            public_key: expected,
            signature,
            verified,
        })?;
    }
    if !verified {
        bail!("Verification for public key {expected}: Failed");
    }
    if !json {
        println!("Verification for public key {expected}: Success");
    }
    Ok(ExitCode::SUCCESS)
}

/// Print how hard a pattern is to find.
pub fn estimate(starts_with: Option<&str>, ends_with: Option<&str>, rate: Option<f64>) -> Result<ExitCode> {
    let pattern = Pattern::from_parts(starts_with, ends_with);
    pattern.validate()?;

    println!("Pattern:           {pattern}");
    println!(
        "Expected attempts: {:.0}",
        difficulty::expected_attempts(&pattern)
    );
    for probability in [0.5, 0.9, 0.99] {
        if let Some(attempts) = difficulty::attempts_for_probability(&pattern, probability) {
            println!(
                "{:>3.0}% chance by:    {attempts:.0} attempts",
                probability * 100.0
            );
        }
    }

    if let Some(rate) = rate {
        match difficulty::estimate_duration(&pattern, rate) {
            Some(duration) => println!("Expected time:     {duration:.1?} at {rate:.0} keys/s"),
            None => println!("Expected time:     unbounded at {rate:.0} keys/s"),
        }
    }
    if starts_with.is_some_and(|p| !p.is_empty()) {
        println!("Note: leading characters are unevenly distributed; actual cost may differ.");
    }

    Ok(ExitCode::SUCCESS)
}

fn print_json<T: Serialize>(report: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn write_keypair(path: &Path, keypair: &Keypair, force: bool) -> Result<()> {
    write_keypair_file(path, keypair, force)
        .with_context(|| format!("failed to write keypair to {}", path.display()))?;
    println!("Wrote keypair to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn seeded_grind(dir: &TempDir) -> GrindOptions {
        GrindOptions {
            starts_with: Some("A".to_string()),
            progress_interval: 1000,
            workers: 1,
            output_dir: Some(dir.path().to_path_buf()),
            seed: Some(11),
            ..GrindOptions::default()
        }
    }

    #[test]
    fn grind_writes_keyfile_named_after_address() {
        let dir = TempDir::new().unwrap();
        let code = grind(&seeded_grind(&dir)).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let written: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(written.len(), 1);

        let path = written[0].as_ref().unwrap().path();
        let keypair = read_keypair_file(&path).unwrap();
        let address = keypair.address();
        assert!(address.starts_with('A'));
        assert_eq!(path.file_name().unwrap().to_str().unwrap(), format!("{address}.json"));
    }

    #[test]
    fn grind_explicit_outfile() {
        let dir = TempDir::new().unwrap();
        let outfile = dir.path().join("vanity.json");
        let opts = GrindOptions {
            outfile: Some(outfile.clone()),
            ..seeded_grind(&dir)
        };

        grind(&opts).unwrap();
        assert!(read_keypair_file(&outfile).unwrap().address().starts_with('A'));
    }

    #[test]
    fn grind_not_found_exit_code() {
        let dir = TempDir::new().unwrap();
        let opts = GrindOptions {
            starts_with: Some("zzzzz".to_string()),
            max_attempts: Some(10),
            ..seeded_grind(&dir)
        };

        let code = grind(&opts).unwrap();
        assert_eq!(code, ExitCode::from(EXIT_NOT_FOUND));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn grind_rejects_invalid_prefix() {
        let dir = TempDir::new().unwrap();
        let opts = GrindOptions {
            starts_with: Some("0x".to_string()),
            ..seeded_grind(&dir)
        };

        let err = grind(&opts).unwrap_err();
        assert!(err.to_string().contains("not in the base58 alphabet"));
    }

    #[test]
    fn grind_refuses_to_discard_key() {
        let dir = TempDir::new().unwrap();
        let opts = GrindOptions {
            no_outfile: true,
            ..seeded_grind(&dir)
        };
        assert!(grind(&opts).is_err());
    }

    #[test]
    fn grind_rejects_existing_outfile_before_searching() {
        let dir = TempDir::new().unwrap();
        let outfile = dir.path().join("vanity.json");
        std::fs::write(&outfile, "old").unwrap();
        let opts = GrindOptions {
            starts_with: Some("zzzz".to_string()),
            max_attempts: Some(10),
            outfile: Some(outfile.clone()),
            ..seeded_grind(&dir)
        };

        let err = grind(&opts).unwrap_err();
        assert!(err.to_string().contains("already exists"), "{err}");
        assert_eq!(std::fs::read_to_string(&outfile).unwrap(), "old");
    }

    #[test]
    fn grind_force_replaces_existing_outfile() {
        let dir = TempDir::new().unwrap();
        let outfile = dir.path().join("vanity.json");
        std::fs::write(&outfile, "old").unwrap();
        let opts = GrindOptions {
            outfile: Some(outfile.clone()),
            force: true,
            ..seeded_grind(&dir)
        };

        assert_eq!(grind(&opts).unwrap(), ExitCode::SUCCESS);
        assert!(read_keypair_file(&outfile).unwrap().address().starts_with('A'));
    }

    #[test]
    fn grind_failed_write_is_an_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        let opts = GrindOptions {
            output_dir: Some(blocker.join("keys")),
            ..seeded_grind(&dir)
        };

        let err = grind(&opts).unwrap_err();
        assert!(err.to_string().contains("failed to write keypair"), "{err}");
    }

    #[test]
    fn seeded_grind_ignores_worker_count() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let single = grind_key(&GrindOptions {
            workers: 1,
            ..seeded_grind(&first)
        });
        let many = grind_key(&GrindOptions {
            workers: 4,
            ..seeded_grind(&second)
        });

        assert_eq!(single, many);
    }

    fn grind_key(opts: &GrindOptions) -> Keypair {
        grind(opts).unwrap();
        let dir = opts.output_dir.as_ref().unwrap();
        let entry = std::fs::read_dir(dir).unwrap().next().unwrap().unwrap();
        read_keypair_file(&entry.path()).unwrap()
    }

    #[test]
    fn grind_json_report() {
        let dir = TempDir::new().unwrap();
        let opts = GrindOptions {
            json: true,
            ..seeded_grind(&dir)
        };
        assert_eq!(grind(&opts).unwrap(), ExitCode::SUCCESS);

        let report = GrindReport {
            pattern: &Pattern::starts_with("A"),
            found: true,
            attempts: 7,
            public_key: Some(PublicKey::from_bytes(&[0u8; 32]).unwrap()),
            elapsed_ms: Some(3),
            worker: Some(0),
            reason: None,
            keyfile: None,
            secret_key: None,
        };
        let value: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["pattern"]["starts_with"], "A");
        assert_eq!(value["public_key"], "11111111111111111111111111111111");
        assert_eq!(value["attempts"], 7);
        assert!(value.get("secret_key").is_none());
    }

    #[test]
    fn new_then_pubkey_and_verify() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("id.json");

        new_keypair(Some(&path), false, false).unwrap();
        let address = read_keypair_file(&path).unwrap().address();

        assert_eq!(pubkey(&path).unwrap(), ExitCode::SUCCESS);
        assert_eq!(verify(&address, &path, false).unwrap(), ExitCode::SUCCESS);
        assert_eq!(verify(&address, &path, true).unwrap(), ExitCode::SUCCESS);
    }

    #[test]
    fn verify_rejects_other_address() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("id.json");
        new_keypair(Some(&path), false, false).unwrap();

        let other = Keypair::generate().address();
        let err = verify(&other, &path, false).unwrap_err();
        assert!(err.to_string().contains("Failed"));
    }

    #[test]
    fn new_refuses_to_discard_key() {
        assert!(new_keypair(None, false, false).is_err());
    }

    #[test]
    fn estimate_validates_pattern() {
        assert!(estimate(Some("ab"), None, Some(100_000.0)).is_ok());
        assert!(estimate(Some("0"), None, None).is_err());
    }
}
