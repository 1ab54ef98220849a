//! Output file handling. Every run produces up to three text files that
//! share a stem: `<stem>.bin`, `<stem>.sym` and `<stem>.lst`.
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct Outputs {
    pub binary:  PathBuf,
    pub symbols: PathBuf,
    pub listing: PathBuf,
}

impl Outputs {
    pub fn new(stem: &Path) -> Self {
        Outputs {
            binary:  stem.with_extension("bin"),
            symbols: stem.with_extension("sym"),
            listing: stem.with_extension("lst"),
        }
    }

    /// Truncates all three outputs so no stale results survive a failed run.
    pub fn clear(&self) -> Result<(), String> {
        for path in &[&self.binary, &self.symbols, &self.listing] {
            write_text(path, "")?;
        }
        Ok(())
    }
}

pub fn write_text(path: &Path, data: &str) -> Result<(), String> {
    let mut file = File::create(path)
        .map_err(|e| format!("unable to open output file `{}`: {}", path.display(), e))?;
    file.write_all(data.as_bytes())
        .map_err(|e| format!("unable to write to output file `{}`: {}", path.display(), e))?;
    debug!("wrote {} byte(s) to `{}`", data.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outputs() {
        let out = Outputs::new(Path::new("build/prog"));
        assert_eq!(out.binary, PathBuf::from("build/prog.bin"));
        assert_eq!(out.symbols, PathBuf::from("build/prog.sym"));
        assert_eq!(out.listing, PathBuf::from("build/prog.lst"));
    }

    #[test]
    fn test_write_and_clear() {
        let stem = std::env::temp_dir().join(format!("tpasm-files-{}", std::process::id()));
        let out = Outputs::new(&stem);

        write_text(&out.binary, "1\n2\n").unwrap();
        assert_eq!(std::fs::read_to_string(&out.binary).unwrap(), "1\n2\n");

        out.clear().unwrap();
        for path in &[&out.binary, &out.symbols, &out.listing] {
            assert_eq!(std::fs::read_to_string(path).unwrap(), "");
            std::fs::remove_file(path).unwrap();
        }
    }
}
