//! `ctlist spki` - decode a log key.

use anyhow::Result;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use ctlist_core::{raw_public_key, CtListError, KeyId};

use crate::cli::args::SpkiArgs;
use crate::exit_codes;

pub fn cmd_spki(args: &SpkiArgs) -> i32 {
    match run_spki(args) {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            super::exit_code_for(&e)
        }
    }
}

fn run_spki(args: &SpkiArgs) -> Result<()> {
    let spki = BASE64
        .decode(args.key.trim())
        .map_err(|e| CtListError::Base64Decode {
            log: "<argument>".to_string(),
            message: e.to_string(),
        })?;
    let raw = raw_public_key(&spki).map_err(|source| CtListError::Der {
        log: "<argument>".to_string(),
        source,
    })?;

    println!("raw_key: {}", hex::encode(&raw));
    println!("key_id:  {}", KeyId::of(&raw));
    Ok(())
}
