use std::{
    fs::{self, File},
    io::{Error, Read, Write},
    path::Path,
};
use tracing::{debug, warn};


/// Read text file contents
pub fn read_text_file(name: &str) -> Result<String, Error> {
    let mut buffer = String::new();
    File::open(name).and_then(|mut file| file.read_to_string(&mut buffer))?;
    Ok(buffer)
}


/// Replace file contents, keeping the previous version as `<name>.bak`
pub fn write_with_backup(name: &str, contents: &str) -> Result<(), Error> {
    if Path::new(name).exists() {
        let backup = format!("{}.bak", name);
        debug!("Moving previous version of: {} to: {}", name, backup);
        if let Err(err) = fs::rename(name, &backup) {
            warn!("Couldn't back up: {}. Details: {}", name, err);
        }
    }
    let mut file = File::create(name)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}
