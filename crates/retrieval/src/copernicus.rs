//! Acquisition through the `copernicusmarine` command line tool.

use ocean_common::format_timestamp;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

use crate::acquisition::{Acquirer, Availability, SubsetRequest};
use crate::error::{Result, RetrievalError};

/// Executable looked up on `PATH` when none is configured.
pub const DEFAULT_PROGRAM: &str = "copernicusmarine";

/// Runs `copernicusmarine subset` for each request.
#[derive(Debug, Clone)]
pub struct CopernicusMarineCli {
    program: PathBuf,
}

impl Default for CopernicusMarineCli {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl CopernicusMarineCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments of the `subset` invocation for `request`.
    pub fn subset_args(request: &SubsetRequest, output_dir: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "subset".into(),
            "--dataset-id".into(),
            request.dataset_id.clone().into(),
        ];
        for variable in &request.variables {
            args.push("--variable".into());
            args.push(variable.into());
        }

        let bbox = &request.bbox;
        let numeric = [
            ("--minimum-longitude", bbox.min_lon),
            ("--maximum-longitude", bbox.max_lon),
            ("--minimum-latitude", bbox.min_lat),
            ("--maximum-latitude", bbox.max_lat),
        ];
        for (flag, value) in numeric {
            args.push(flag.into());
            args.push(value.to_string().into());
        }

        args.push("--start-datetime".into());
        args.push(format_timestamp(&request.window.start).into());
        args.push("--end-datetime".into());
        args.push(format_timestamp(&request.window.end).into());
        args.push("--output-directory".into());
        args.push(output_dir.as_os_str().to_owned());
        args
    }
}

impl Acquirer for CopernicusMarineCli {
    fn availability(&self) -> Availability {
        if !cfg!(feature = "netcdf") {
            return Availability::Unavailable("built without NetCDF support".to_string());
        }

        match Command::new(&self.program).arg("--version").output() {
            Ok(output) if output.status.success() => {
                debug!(
                    program = %self.program.display(),
                    version = %String::from_utf8_lossy(&output.stdout).trim(),
                    "Acquisition tool available"
                );
                Availability::Available
            }
            Ok(output) => Availability::Unavailable(format!(
                "{} --version exited with {}",
                self.program.display(),
                output.status
            )),
            Err(e) => {
                warn!(program = %self.program.display(), error = %e, "Acquisition tool not found");
                Availability::Unavailable(format!("cannot run {}: {}", self.program.display(), e))
            }
        }
    }

    fn subset(&self, request: &SubsetRequest, output_dir: &Path) -> Result<()> {
        let output = Command::new(&self.program)
            .args(Self::subset_args(request, output_dir))
            .output()
            .map_err(|e| {
                RetrievalError::Acquisition(format!(
                    "failed to run {}: {}",
                    self.program.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            return Err(RetrievalError::Acquisition(format!(
                "subset exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocean_common::{BoundingBox, TimeWindow};

    fn request() -> SubsetRequest {
        SubsetRequest {
            dataset_id: "cmems_mod_glo_wav_my_0.2deg_PT3H-i".to_string(),
            variables: vec!["VHM0".to_string(), "VTM02".to_string()],
            bbox: BoundingBox::new(-9.45, -9.30, 39.30, 39.40),
            window: TimeWindow::parse("2023-04-01T00:00:00", "2023-04-01T12:00:00").unwrap(),
        }
    }

    fn flag_value<'a>(args: &'a [String], flag: &str) -> Vec<&'a str> {
        args.windows(2)
            .filter(|w| w[0] == flag)
            .map(|w| w[1].as_str())
            .collect()
    }

    #[test]
    fn test_subset_args() {
        let output_dir = Path::new("/tmp/cmems_abc");
        let args: Vec<String> = CopernicusMarineCli::subset_args(&request(), output_dir)
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!(args[0], "subset");
        assert_eq!(flag_value(&args, "--dataset-id"), vec!["cmems_mod_glo_wav_my_0.2deg_PT3H-i"]);
        assert_eq!(flag_value(&args, "--variable"), vec!["VHM0", "VTM02"]);
        assert_eq!(flag_value(&args, "--minimum-longitude"), vec!["-9.45"]);
        assert_eq!(flag_value(&args, "--maximum-latitude"), vec!["39.4"]);
        assert_eq!(flag_value(&args, "--start-datetime"), vec!["2023-04-01T00:00:00"]);
        assert_eq!(flag_value(&args, "--end-datetime"), vec!["2023-04-01T12:00:00"]);
        assert_eq!(flag_value(&args, "--output-directory"), vec!["/tmp/cmems_abc"]);
    }

    #[test]
    fn test_missing_program_is_unavailable() {
        let cli = CopernicusMarineCli::new("/nonexistent/copernicusmarine-test-binary");
        assert!(matches!(cli.availability(), Availability::Unavailable(_)));
    }

    #[test]
    fn test_missing_program_subset_fails() {
        let cli = CopernicusMarineCli::new("/nonexistent/copernicusmarine-test-binary");
        let dir = tempfile::tempdir().unwrap();
        let err = cli.subset(&request(), dir.path()).unwrap_err();
        assert!(matches!(err, RetrievalError::Acquisition(_)));
    }
}
