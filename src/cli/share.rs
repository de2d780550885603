//! Share command - print a share token

use anyhow::Result;
use ngender::{share, validate_name, Mode};

pub fn run(name: &str, mode: Mode) -> Result<()> {
    let name = validate_name(name, false)?;
    println!("{}", share::encode(&name, mode));
    Ok(())
}
