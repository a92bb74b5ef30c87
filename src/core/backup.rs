use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{confirm, info, success, warning};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database to `dest_file`, optionally compressing it
    /// (zip on Windows, tar.gz elsewhere). Returns the final path, or
    /// `None` when the user refused to overwrite an existing file.
    pub fn backup(
        db_path: &str,
        dest_file: &str,
        compress: bool,
        force: bool,
    ) -> AppResult<Option<PathBuf>> {
        let src = Path::new(db_path);
        let dest = crate::utils::path::expand_tilde(dest_file);

        if !dest.is_absolute() {
            return Err(AppError::Other(format!(
                "Backup path must be absolute: {dest_file}"
            )));
        }

        if !src.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )
            .into());
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        if dest.exists()
            && !force
            && !confirm(&format!("The file '{}' already exists. Overwrite it?", dest.display()))
        {
            info("Backup cancelled.");
            return Ok(None);
        }

        fs::copy(src, &dest)?;
        success(format!("Backup created: {}", dest.display()));

        let final_path = if compress {
            let compressed = if cfg!(target_os = "windows") {
                let zip_path = dest.with_extension("zip");
                zip_file(&dest, &zip_path)?;
                zip_path
            } else {
                let tgz_path = dest.with_extension("tar.gz");
                tar_gz_file(&dest, &tgz_path)?;
                tgz_path
            };
            success(format!("📦 Compressed: {}", compressed.display()));

            if let Err(e) = fs::remove_file(&dest) {
                warning(format!("Failed to remove uncompressed backup: {}", e));
            }
            compressed
        } else {
            dest
        };

        if let Ok(pool) = DbPool::new(db_path) {
            ttlog_quiet(
                &pool.conn,
                "backup",
                &final_path.to_string_lossy(),
                if compress {
                    "Backup created and compressed"
                } else {
                    "Backup created"
                },
            );
        }

        Ok(Some(final_path))
    }
}

fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "database.sqlite".to_string())
}

/// Write `src` as the single entry of a deflated zip archive at `dest`.
pub fn zip_file(src: &Path, dest: &Path) -> AppResult<()> {
    let file = fs::File::create(dest)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file(entry_name(src), options)
        .map_err(std::io::Error::other)?;

    let mut f = fs::File::open(src)?;
    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    Ok(())
}

/// Write `src` into a gzip-compressed tarball at `dest`.
pub fn tar_gz_file(src: &Path, dest: &Path) -> AppResult<()> {
    let file = fs::File::create(dest)?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut archive = tar::Builder::new(encoder);

    let mut f = fs::File::open(src)?;
    archive.append_file(entry_name(src), &mut f)?;
    archive.into_inner()?.finish()?;

    Ok(())
}
