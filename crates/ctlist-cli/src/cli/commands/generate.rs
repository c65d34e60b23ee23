//! `ctlist generate` - verify the log list and emit the log table.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use ctlist_core::{
    generate, Clock, CtListError, EmitOptions, FileSource, FixedClock, GenerateConfig,
    PublicKeyVerifier, SystemClock,
};

use crate::cli::args::GenerateArgs;
use crate::exit_codes;

pub fn cmd_generate(args: GenerateArgs) -> i32 {
    match run_generate(&args) {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            super::exit_code_for(&e)
        }
    }
}

/// Config file, then `CTLIST_*` variables, then flags.
pub(crate) fn resolve_config(args: &GenerateArgs) -> Result<GenerateConfig> {
    let mut config = match &args.config {
        Some(path) => GenerateConfig::from_yaml_file(path)?,
        None => GenerateConfig::default(),
    }
    .with_env()?;

    if let Some(path) = &args.log_list {
        config = config.with_log_list(path);
    }
    if let Some(path) = &args.signature {
        config = config.with_signature(path);
    }
    if let Some(path) = &args.public_key {
        config = config.with_public_key(path);
    }
    if let Some(path) = &args.output {
        config = config.with_output(path);
    }
    if let Some(now) = args.now {
        config = config.with_now(now);
    }
    if let Some(log_type) = &args.log_type {
        config = config.with_log_type(log_type);
    }
    Ok(config)
}

fn run_generate(args: &GenerateArgs) -> Result<()> {
    let config = resolve_config(args)?;

    let pem = std::fs::read_to_string(&config.public_key).map_err(|e| CtListError::Config {
        message: format!(
            "failed to read public key {}: {e}",
            config.public_key.display()
        ),
    })?;
    let verifier = PublicKeyVerifier::from_spki_pem(&pem)?;
    tracing::info!(
        public_key = %config.public_key.display(),
        algorithm = verifier.algorithm(),
        "loaded log list signing key"
    );

    let clock: Box<dyn Clock> = match config.now {
        Some(now) => Box::new(FixedClock::new(now)),
        None => Box::new(SystemClock),
    };

    let source = FileSource::new(&config.log_list, &config.signature);
    let options = EmitOptions {
        log_type: config.log_type.clone(),
    };
    let code = generate(&source, &verifier, clock.as_ref(), &options)
        .with_context(|| format!("failed to convert {}", config.log_list.display()))?;

    match &config.output {
        Some(path) => {
            write_atomic(path, code.as_bytes())?;
            tracing::info!(output = %path.display(), "wrote log table");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(code.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|e| CtListError::Io {
                    message: format!("failed to write stdout: {e}"),
                })?;
        }
    }
    Ok(())
}

/// Write via a temp file in the target directory so a failed run never
/// leaves a truncated table behind.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let io_err = |e: std::io::Error| CtListError::Io {
        message: format!("failed to write {}: {e}", path.display()),
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(bytes).map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}
