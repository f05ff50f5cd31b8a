//! One run of the decoder: resolve the file, decode its header, print the report.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use ines::CartridgeHeader;

use crate::config::{Config, HELP};
use crate::error::AppError;
use crate::report::{FieldReport, InterpretationReport, raw_dump};

const KB: u64 = 1024;

/// Runs the decoder for `config`, writing user-facing text to `out`.
///
/// # Errors
///
/// Every failure is returned as an [`AppError`] so `main` can pick the exit code.
pub fn run<W: Write>(config: &Config, out: &mut W) -> Result<(), AppError> {
    let write_err = |e| AppError::io("Writing Output", e);

    writeln!(out, "=== NES Header Decoder ===").map_err(write_err)?;

    if config.debug {
        for (n, arg) in config.args.iter().enumerate() {
            tracing::debug!("#{n} - Args: {arg}");
        }
    }

    if config.help_only {
        write!(out, "{HELP}").map_err(write_err)?;
        return Ok(());
    }

    let path = config.file.as_deref().ok_or(AppError::NoFilename)?;

    if config.show_version {
        writeln!(out, "Info: Version = {}", env!("CARGO_PKG_VERSION")).map_err(write_err)?;
    }
    if config.show_help {
        write!(out, "{HELP}").map_err(write_err)?;
    }
    tracing::debug!("Debug: Enabled.");

    writeln!(out, "==========================").map_err(write_err)?;
    writeln!(out, "\nInfo: Opening File.").map_err(write_err)?;
    tracing::debug!("Filename = {}", path.display());

    let header = decode_file(path, out)?;

    if config.debug {
        match raw_dump(&header) {
            Ok(dump) => write!(out, "{dump}").map_err(write_err)?,
            Err(e) => tracing::warn!("Failed to generate json: {e}"),
        }
    }
    if !header.has_clean_padding() {
        tracing::warn!("header padding is not zero: {:02X?}", header.padding());
    }

    writeln!(out, "\nInfo: Decoded Header.").map_err(write_err)?;
    write!(out, "{}", FieldReport(&header)).map_err(write_err)?;
    writeln!(out, "\nInfo: Interpretation.").map_err(write_err)?;
    write!(out, "{}", InterpretationReport(&header)).map_err(write_err)?;

    Ok(())
}

fn decode_file<W: Write>(path: &Path, out: &mut W) -> Result<CartridgeHeader, AppError> {
    let exists = path
        .try_exists()
        .map_err(|e| AppError::io("Checking File", e))?;
    if !exists {
        return Err(AppError::FileNotFound(path.to_path_buf()));
    }
    writeln!(out, "Info: File Exists.").map_err(|e| AppError::io("Writing Output", e))?;

    let mut file = File::open(path).map_err(|e| AppError::io("Opening File", e))?;
    let metadata = file
        .metadata()
        .map_err(|e| AppError::io("Getting File Size", e))?;
    tracing::debug!("File Size = {} KB", metadata.len() / KB);

    Ok(CartridgeHeader::decode(&mut file)?)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Cursor;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use ines::DecodeError;
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    use super::*;

    use pretty_assertions::assert_eq;

    const NROM_HEADER: [u8; 16] = [
        0x4E, 0x45, 0x53, 0x1A, 0x02, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00,
    ];

    /// A file in the temp dir, removed on drop.
    struct Fixture(PathBuf);

    impl Fixture {
        fn new(name: &str, data: &[u8]) -> Self {
            let path = std::env::temp_dir().join(format!(
                "nes-header-decoder-{name}-{}.nes",
                std::process::id()
            ));
            fs::write(&path, data).unwrap();
            Self(path)
        }
    }

    impl Drop for Fixture {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.0);
        }
    }

    /// Counts every event that reaches the subscriber, whatever its level.
    struct EventCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for EventCounter {
        fn on_event(&self, _event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn config(args: &[&str]) -> Config {
        Config::from_args(std::iter::once("nes-header-decoder").chain(args.iter().copied()))
            .unwrap()
    }

    fn run_to_string(config: &Config) -> (Result<(), AppError>, String) {
        let mut out = Vec::new();
        let result = run(config, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn decodes_file() {
        let mut image = NROM_HEADER.to_vec();
        image.extend_from_slice(&[0; 32 * 1024 + 8 * 1024]);
        let fixture = Fixture::new("valid", &image);

        let (result, out) = run_to_string(&config(&[fixture.0.to_str().unwrap()]));

        result.unwrap();
        assert!(out.starts_with("=== NES Header Decoder ===\n"));
        assert!(out.contains("Info: File Exists.\n"));
        assert!(out.contains("Magic:    NES x1a\nPRG ROM:  32 KB\nCHR ROM:  8 KB\n"));
        assert!(out.contains("Mapper:       0 (NROM)\n"));
        assert!(out.contains("Mirroring:    Vertical\n"));
        assert!(!out.contains("Info: Version"));
        assert!(!out.contains('*'));
    }

    #[test]
    fn debug_adds_raw_dump() {
        let fixture = Fixture::new("debug", &NROM_HEADER);

        let (result, out) = run_to_string(&config(&["-d", fixture.0.to_str().unwrap()]));

        result.unwrap();
        assert!(out.contains("*{\n"));
        assert!(out.contains("*    \"prg_rom_units\": 2,\n"));
    }

    #[test]
    fn version_and_help_before_report() {
        let fixture = Fixture::new("version", &NROM_HEADER);

        let (result, out) = run_to_string(&config(&["-v", "-h", fixture.0.to_str().unwrap()]));

        result.unwrap();
        let version = out.find("Info: Version = 0.0.1").unwrap();
        let help = out.find("The flags are:").unwrap();
        let report = out.find("Info: Decoded Header.").unwrap();
        assert!(version < help && help < report);
    }

    #[test]
    fn help_only() {
        let (result, out) = run_to_string(&config(&["-h"]));

        result.unwrap();
        assert_eq!(out, format!("=== NES Header Decoder ===\n{HELP}"));
    }

    #[test]
    fn no_filename() {
        let (result, out) = run_to_string(&config(&["-v"]));

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::NoFilename));
        assert_eq!(err.exit_code(), 2);
        // Version is only printed once a file is known.
        assert_eq!(out, "=== NES Header Decoder ===\n");
    }

    #[test]
    fn missing_file() {
        let path = std::env::temp_dir().join("nes-header-decoder-does-not-exist.nes");

        let (result, out) = run_to_string(&config(&[path.to_str().unwrap()]));

        let err = result.unwrap_err();
        assert!(matches!(&err, AppError::FileNotFound(p) if *p == path));
        assert_eq!(err.exit_code(), 3);
        assert!(!out.contains("Info: File Exists."));
    }

    #[test]
    fn truncated_file() {
        let fixture = Fixture::new("truncated", &NROM_HEADER[..10]);

        let (result, out) = run_to_string(&config(&[fixture.0.to_str().unwrap()]));

        let err = result.unwrap_err();
        assert!(matches!(
            err,
            AppError::Decode(DecodeError::TruncatedInput { observed: 10 })
        ));
        assert_eq!(err.exit_code(), 4);
        assert!(!out.contains("Info: Decoded Header."));
    }

    #[test]
    fn not_an_nes_file() {
        let fixture = Fixture::new("magic", b"GIF89a\x01\x00\x01\x00\x80\x00\x00\xff\xff\xff");

        let (result, _) = run_to_string(&config(&[fixture.0.to_str().unwrap()]));

        let err = result.unwrap_err();
        assert!(matches!(
            err,
            AppError::Decode(DecodeError::InvalidMagic { found, .. }) if found == *b"GIF8"
        ));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn directory_is_a_read_failure() {
        let dir = std::env::temp_dir();

        let (result, out) = run_to_string(&config(&[dir.to_str().unwrap()]));

        let err = result.unwrap_err();
        // Linux opens a directory and fails on read, other systems fail on open.
        assert!(
            matches!(
                err,
                AppError::Decode(DecodeError::SourceReadFailure(_)) | AppError::Io { .. }
            ),
            "{err:?}"
        );
        assert_eq!(err.exit_code(), 5);
        assert!(!out.contains("Info: Decoded Header."));
    }

    #[test]
    fn decoder_is_silent() {
        let events = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(EventCounter(Arc::clone(&events)));

        tracing::subscriber::with_default(subscriber, || {
            CartridgeHeader::decode(&mut Cursor::new(NROM_HEADER)).unwrap();
            CartridgeHeader::decode(&mut Cursor::new(&NROM_HEADER[..7])).unwrap_err();
            CartridgeHeader::from_bytes(b"GIF89a\x01\x00\x01\x00\x80\x00\x00\xff\xff\xff")
                .unwrap_err();
            assert_eq!(events.load(Ordering::SeqCst), 0);

            // The counter does see events from this thread.
            tracing::trace!("checkpoint");
        });

        assert_eq!(events.load(Ordering::SeqCst), 1);
    }
}
