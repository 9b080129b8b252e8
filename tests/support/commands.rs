//! Command helper methods for Test.

use super::{Test, REGION, SECRET_NAME};
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// A tether command pointed at this test's project and store.
    ///
    /// Inherited `TETHER_*` and AWS variables are cleared so the host
    /// environment cannot leak in.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("tether").expect("failed to find tether binary");
        for var in [
            "TETHER_CONFIG",
            "TETHER_LOG",
            "TETHER_ENV_FILE",
            "AWS_REGION",
        ] {
            cmd.env_remove(var);
        }
        cmd.env("HOME", self.home.path());
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("NO_COLOR", "1");
        cmd.env("TETHER_SECRET_NAME", SECRET_NAME);
        cmd.env("TETHER_REGION", REGION);
        cmd.env("TETHER_STORE_DIR", self.store_dir());
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Run `tether <args>` and capture its output.
    pub fn run(&self, args: &[&str]) -> Output {
        self.cmd()
            .args(args)
            .output()
            .expect("failed to run tether")
    }

    pub fn push(&self, extra: &[&str]) -> Output {
        self.run(&[&["push"][..], extra].concat())
    }

    pub fn pull(&self, extra: &[&str]) -> Output {
        self.run(&[&["pull"][..], extra].concat())
    }

    pub fn backup(&self, extra: &[&str]) -> Output {
        self.run(&[&["backup"][..], extra].concat())
    }

    pub fn compare(&self, extra: &[&str]) -> Output {
        self.run(&[&["compare"][..], extra].concat())
    }

    pub fn validate(&self, extra: &[&str]) -> Output {
        self.run(&[&["validate"][..], extra].concat())
    }

    /// `tether run -- <command>`
    pub fn run_with(&self, command: &[&str]) -> Output {
        self.run(&[&["run", "--"][..], command].concat())
    }
}
