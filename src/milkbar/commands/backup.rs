use crate::commands::{CmdMessage, CmdResult};
use crate::error::{MilkbarError, Result};
use crate::model::Dataset;
use crate::store::DataStore;
use chrono::Utc;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Archive the current dataset as a timestamped tar.gz in `out_dir`.
pub fn run<S: DataStore>(store: &S, out_dir: &Path) -> Result<CmdResult> {
    let data = store.load()?;

    let now = Utc::now();
    let filename = format!("milkbar-{}.tar.gz", now.format("%Y-%m-%d_%H-%M-%S"));
    let path = out_dir.join(&filename);
    let file = File::create(&path).map_err(MilkbarError::Io)?;

    write_archive(file, &data)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Backed up to {}",
        path.display()
    )));
    Ok(result)
}

fn write_archive<W: Write>(writer: W, data: &Dataset) -> Result<()> {
    let enc = GzEncoder::new(writer, Compression::default());
    let mut tar = tar::Builder::new(enc);

    let content = serde_json::to_string_pretty(data).map_err(MilkbarError::Serialization)?;

    let mut header = tar::Header::new_gnu();
    header.set_size(content.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();

    tar.append_data(&mut header, "milkbar/data.json", content.as_bytes())
        .map_err(MilkbarError::Io)?;

    tar.finish().map_err(MilkbarError::Io)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use tempfile::tempdir;

    #[test]
    fn test_write_archive_produces_gzip() {
        let store = StoreFixture::new()
            .with_product("Fresh Milk", 60.0, "liter", 100.0)
            .store;
        let data = store.load().unwrap();

        let mut buf = Vec::new();
        write_archive(&mut buf, &data).unwrap();

        assert!(!buf.is_empty());
        // Gzip header magic is 1f 8b
        assert_eq!(buf[0], 0x1f);
        assert_eq!(buf[1], 0x8b);
    }

    #[test]
    fn run_creates_timestamped_file() {
        let store = StoreFixture::new().store;
        let dir = tempdir().unwrap();

        run(&store, dir.path()).unwrap();

        let entries: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].starts_with("milkbar-"));
        assert!(entries[0].ends_with(".tar.gz"));
    }
}
