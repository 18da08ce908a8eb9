//! Two-phase version synchronization across a target manifest.

use std::fs;
use std::path::PathBuf;

use crate::encoding::FileEncoding;
use crate::error::{Result, SyncError};
use crate::manifest::{Manifest, Target};
use crate::rules::compile_rules;
use crate::version::Version;

/// Summary of a completed synchronization run.
#[derive(Debug)]
pub struct SyncReport {
    /// Files written, in manifest order.
    pub files: Vec<PathBuf>,

    /// How many of them actually changed.
    pub changed: usize,
}

/// Applies a new version across every target in a manifest.
///
/// The run is two-phase: every file is read and transformed in memory
/// before anything is written, so an unreadable or undecodable target
/// leaves the working tree untouched. Write failures during the commit
/// phase abort immediately; files already committed stay committed.
pub struct Synchronizer {
    manifest: Manifest,
}

struct PendingWrite {
    path: PathBuf,
    bytes: Vec<u8>,
    changed: bool,
}

impl Synchronizer {
    pub fn new(manifest: Manifest) -> Self {
        Self { manifest }
    }

    /// Rewrite every target's version fields to `version`.
    ///
    /// Targets without a matching anchor are rewritten unchanged; the
    /// operation is idempotent.
    pub fn synchronize(&self, version: &Version) -> Result<SyncReport> {
        let mut pending = Vec::with_capacity(self.manifest.targets.len());
        for target in &self.manifest.targets {
            pending.push(self.transform(target, version)?);
        }

        let mut files = Vec::with_capacity(pending.len());
        let mut changed = 0;
        for write in pending {
            fs::write(&write.path, &write.bytes).map_err(|e| SyncError::Write {
                path: write.path.clone(),
                source: e,
            })?;

            let absolute =
                std::path::absolute(&write.path).unwrap_or_else(|_| write.path.clone());
            tracing::info!("{}", absolute.display());

            if write.changed {
                changed += 1;
            }
            files.push(write.path);
        }

        Ok(SyncReport { files, changed })
    }

    fn transform(&self, target: &Target, version: &Version) -> Result<PendingWrite> {
        let bytes = fs::read(&target.path).map_err(|e| SyncError::Read {
            path: target.path.clone(),
            source: e,
        })?;

        let encoding = FileEncoding::detect(&bytes, target.fallback_encoding());
        let content = encoding.decode(&bytes).map_err(|e| SyncError::Decode {
            path: target.path.clone(),
            source: e,
        })?;

        let rules = compile_rules(target.dialect, version);
        let mut output = String::with_capacity(content.len());
        // split_inclusive keeps each line's terminator, so LF/CRLF and a
        // missing final newline survive the rewrite byte-for-byte.
        for line in content.split_inclusive('\n') {
            let rewritten = rules
                .iter()
                .fold(line.to_string(), |line, rule| rule.apply(&line));
            output.push_str(&rewritten);
        }

        let rewritten = encoding.encode(&output);
        let changed = rewritten != bytes;
        Ok(PendingWrite {
            path: target.path.clone(),
            bytes: rewritten,
            changed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::TextEncoding;
    use crate::rules::Dialect;
    use pretty_assertions::assert_eq;
    use std::path::Path;
    use tempfile::tempdir;

    fn utf16le(content: &str) -> Vec<u8> {
        FileEncoding {
            encoding: TextEncoding::Utf16Le,
            bom: true,
        }
        .encode(content)
    }

    fn manifest_for(targets: Vec<Target>) -> Manifest {
        Manifest { targets }
    }

    fn target(path: &Path, dialect: Dialect) -> Target {
        Target {
            path: path.to_path_buf(),
            dialect,
            encoding: None,
        }
    }

    fn sync(targets: Vec<Target>, version: &str) -> Result<SyncReport> {
        let version = Version::parse(version).unwrap();
        Synchronizer::new(manifest_for(targets)).synchronize(&version)
    }

    #[test]
    fn rewrites_a_resource_script_end_to_end() {
        let dir = tempdir().unwrap();
        let rc = dir.path().join("app.rc");
        fs::write(
            &rc,
            utf16le(
                "FILEVERSION 0,1,0\nPRODUCTVERSION 0,1,0\n\"FileVersion\", \"0.1.0.0\"\n\"ProductVersion\", \"0.1.0.0\"\n",
            ),
        )
        .unwrap();

        let report = sync(vec![target(&rc, Dialect::ResourceScript)], "2.0.1").unwrap();
        assert_eq!(report.files.len(), 1);
        assert_eq!(report.changed, 1);

        let bytes = fs::read(&rc).unwrap();
        assert_eq!(
            bytes,
            utf16le(
                "FILEVERSION 2,0,1\nPRODUCTVERSION 2,0,1\n\"FileVersion\", \"2.0.1.0\"\n\"ProductVersion\", \"2.0.1.0\"\n",
            )
        );
    }

    #[test]
    fn rewrites_assembly_metadata() {
        let dir = tempdir().unwrap();
        let cs = dir.path().join("AssemblyInfo.cs");
        fs::write(
            &cs,
            "[assembly: AssemblyVersion(\"0.1.0.0\")]\n[assembly: AssemblyFileVersion(\"0.1.0.0\")]\n",
        )
        .unwrap();

        sync(vec![target(&cs, Dialect::AssemblyInfo)], "1.2.3").unwrap();

        assert_eq!(
            fs::read_to_string(&cs).unwrap(),
            "[assembly: AssemblyVersion(\"1.2.3.0\")]\n[assembly: AssemblyFileVersion(\"1.2.3.0\")]\n",
        );
    }

    #[test]
    fn preserves_encoding_and_surrounding_bytes() {
        let dir = tempdir().unwrap();
        let rc = dir.path().join("app.rc");
        let original = "// generated\r\nFILEVERSION 0,1,0,0\r\nIDI_ICON1 ICON \"app.ico\"\r\n";
        fs::write(&rc, utf16le(original)).unwrap();

        sync(vec![target(&rc, Dialect::ResourceScript)], "2.0.1").unwrap();

        let bytes = fs::read(&rc).unwrap();
        // BOM and 16-bit encoding survive.
        assert_eq!(&bytes[..2], &[0xFF, 0xFE]);
        assert_eq!(
            bytes,
            utf16le("// generated\r\nFILEVERSION 2,0,1,0\r\nIDI_ICON1 ICON \"app.ico\"\r\n")
        );
    }

    #[test]
    fn preserves_missing_final_newline() {
        let dir = tempdir().unwrap();
        let cs = dir.path().join("AssemblyInfo.cs");
        fs::write(&cs, "[assembly: AssemblyVersion(\"0.1.0\")]").unwrap();

        sync(vec![target(&cs, Dialect::AssemblyInfo)], "2.0.1").unwrap();

        assert_eq!(
            fs::read_to_string(&cs).unwrap(),
            "[assembly: AssemblyVersion(\"2.0.1\")]",
        );
    }

    #[test]
    fn file_without_anchors_is_rewritten_unchanged() {
        let dir = tempdir().unwrap();
        let rc = dir.path().join("strings.rc");
        let original = utf16le("STRINGTABLE\nBEGIN\n    IDS_NAME \"Copyright 1.2.3 Corp\"\nEND\n");
        fs::write(&rc, &original).unwrap();

        let report = sync(vec![target(&rc, Dialect::ResourceScript)], "2.0.1").unwrap();

        assert_eq!(report.changed, 0);
        assert_eq!(fs::read(&rc).unwrap(), original);
    }

    #[test]
    fn second_run_is_a_byte_identical_no_op() {
        let dir = tempdir().unwrap();
        let rc = dir.path().join("app.rc");
        fs::write(&rc, utf16le("FILEVERSION 0,1,0,0\n")).unwrap();

        sync(vec![target(&rc, Dialect::ResourceScript)], "2.0.1").unwrap();
        let after_first = fs::read(&rc).unwrap();

        let report = sync(vec![target(&rc, Dialect::ResourceScript)], "2.0.1").unwrap();
        assert_eq!(report.changed, 0);
        assert_eq!(fs::read(&rc).unwrap(), after_first);
    }

    #[test]
    fn bomless_file_uses_the_configured_fallback() {
        let dir = tempdir().unwrap();
        let rc = dir.path().join("app.rc");
        let bomless = FileEncoding {
            encoding: TextEncoding::Utf16Le,
            bom: false,
        };
        fs::write(&rc, bomless.encode("PRODUCTVERSION 0,1,0\n")).unwrap();

        sync(vec![target(&rc, Dialect::ResourceScript)], "2.0.1").unwrap();

        let bytes = fs::read(&rc).unwrap();
        assert_ne!(&bytes[..2], &[0xFF, 0xFE]);
        assert_eq!(bytes, bomless.encode("PRODUCTVERSION 2,0,1\n"));
    }

    #[test]
    fn missing_target_leaves_the_batch_untouched() {
        let dir = tempdir().unwrap();
        let rc = dir.path().join("app.rc");
        let original = utf16le("FILEVERSION 0,1,0,0\n");
        fs::write(&rc, &original).unwrap();

        let err = sync(
            vec![
                target(&rc, Dialect::ResourceScript),
                target(&dir.path().join("missing.rc"), Dialect::ResourceScript),
            ],
            "2.0.1",
        )
        .unwrap_err();

        assert!(matches!(err, SyncError::Read { .. }));
        // The transform phase failed, so nothing was committed.
        assert_eq!(fs::read(&rc).unwrap(), original);
    }

    #[test]
    fn undecodable_target_leaves_the_batch_untouched() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.cs");
        let bad = dir.path().join("bad.cs");
        fs::write(&good, "[assembly: AssemblyVersion(\"0.1.0\")]\n").unwrap();
        fs::write(&bad, [0xC3, 0x28]).unwrap();

        let err = sync(
            vec![
                target(&good, Dialect::AssemblyInfo),
                target(&bad, Dialect::AssemblyInfo),
            ],
            "2.0.1",
        )
        .unwrap_err();

        assert!(matches!(err, SyncError::Decode { .. }));
        assert_eq!(
            fs::read_to_string(&good).unwrap(),
            "[assembly: AssemblyVersion(\"0.1.0\")]\n"
        );
    }

    #[test]
    fn processes_targets_in_manifest_order() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("a.rc");
        let second = dir.path().join("b.rc");
        fs::write(&first, utf16le("FILEVERSION 0,1,0\n")).unwrap();
        fs::write(&second, utf16le("FILEVERSION 0,1,0\n")).unwrap();

        let report = sync(
            vec![
                target(&first, Dialect::ResourceScript),
                target(&second, Dialect::ResourceScript),
            ],
            "2.0.1",
        )
        .unwrap();

        assert_eq!(report.files, vec![first, second]);
    }
}
