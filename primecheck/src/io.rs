//! Opening the input and output streams named on the command line.

use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use crate::error::Error;

/// Opens `path` for reading, or locks stdin when no path is given.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn Read>, Error> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .map_err(|error| Error::OpenInput(error, path.to_path_buf()))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(std::io::stdin().lock())),
    }
}

/// Creates (or truncates) `path` for writing, or locks stdout when no path
/// is given.
pub fn create_output(path: Option<&Path>) -> Result<Box<dyn Write>, Error> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .map_err(|error| Error::CreateOutput(error, path.to_path_buf()))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(std::io::stdout().lock())),
    }
}
