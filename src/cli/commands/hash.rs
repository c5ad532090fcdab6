//! Password hashing command
//!
//! Implements `hash-pw`: hashes a password for use in the
//! `adminAuth.users[].password` and `httpNodeAuth.pass` fields.

use std::io::Read;

use crate::cli::args::HashPwArgs;
use crate::error::WeftError;
use crate::secrets;

/// Hash a password and print the PHC string to stdout.
///
/// Reads one line from stdin when no password argument is given, so the
/// secret can be piped in instead of landing in shell history.
///
/// # Errors
///
/// Returns a usage-style I/O error for an empty password, or a hash error
/// if the hashing backend fails.
pub fn run(args: &HashPwArgs) -> Result<(), WeftError> {
    let plain = match &args.password {
        Some(password) => password.clone(),
        None => read_password_from_stdin()?,
    };

    if plain.is_empty() {
        return Err(WeftError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "password must not be empty",
        )));
    }

    let hash = secrets::hash_password(&plain)?;
    println!("{hash}");
    Ok(())
}

/// Reads the password as the first line of stdin.
fn read_password_from_stdin() -> Result<String, WeftError> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    Ok(input
        .lines()
        .next()
        .unwrap_or_default()
        .trim_end_matches('\r')
        .to_string())
}
