use clap::ValueEnum;
use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
    process,
};

/// Writes `contents` to a sibling temporary file and renames it over `path`, so
/// readers see either the old file or the complete new one
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp = tmp_path(path);
    let result = File::create(&tmp)
        .and_then(|mut file| {
            file.write_all(contents)?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&tmp, path));

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

/// `<path>.<pid>.tmp`, so concurrent runs writing the same header never share one
fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".{}.tmp", process::id()));
    PathBuf::from(name)
}

/// How the build is told that the header now exists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Signal {
    #[default]
    None,
    /// `cargo::rustc-cfg` lines for a build script
    Cargo,
    /// A `-D` compiler flag
    Define,
}

impl Signal {
    /// Lines to print on stdout for the `<SYMBOL>_AVAILABLE` define
    pub fn lines(self, define: &str) -> Vec<String> {
        match self {
            Self::None => vec![],
            Self::Cargo => {
                let cfg = define.to_ascii_lowercase();
                vec![
                    format!("cargo::rustc-check-cfg=cfg({cfg})"),
                    format!("cargo::rustc-cfg={cfg}"),
                ]
            }
            Self::Define => vec![format!("-D{define}")],
        }
    }
}
