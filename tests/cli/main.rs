use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use serde_json::Value;
use tempfile::TempDir;

mod apply_job;
mod make_job;

const BIN_NAME: &str = "babeljob";

/// Source-language trees the job files follow, in file order.
pub const REFERENCE_JSON: &str = r#"{
  "alreadyPartiallyTranslatedKey": { "theNotYetTranslatedOne": "yup" },
  "arrayvalue": [5, "items", "in", "an", "array"],
  "keywithplaceholdersinhtml": "Key with {0} placeholders in HTML, English",
  "objectvalue": { "key1": "value1", "key2": "value2" },
  "objectvaluewithsomemissingkeysinthestructure": { "foo": { "bar": "baz", "quux": "blah" } },
  "simplekeyinhtml": "Simple key in HTML, English",
  "simplekeyinhtmlattribute": "Simple key in HTML attribute, English",
  "simplekeyinknockoutjstemplate": "Simple key in a Knockout.js template",
  "stringvalue": "value",
  "withexistingkeys": "the English value"
}"#;

/// Store with a few translations already in place.
pub const STORE_JSON: &str = r#"{
  "withexistingkeys": { "en": "the English value", "da": "the Danish value" },
  "objectvaluewithsomemissingkeysinthestructure": {
    "en": { "foo": { "bar": "baz", "quux": "blah" } },
    "da": { "foo": { "bar": "baz" } }
  },
  "alreadyPartiallyTranslatedKey": {
    "en": { "theTranslatedOne": "yep", "theNotYetTranslatedOne": "yup" },
    "da": { "theTranslatedOne": "ja" },
    "de": { "theTranslatedOne": "Ja" }
  }
}"#;

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Stops the config file search at the project directory.
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    /// Project with `reference.json`, `thething.i18n` and a config for en, da and de.
    pub fn with_translations() -> Result<Self> {
        let test = Self::with_file("reference.json", REFERENCE_JSON)?;
        test.write_file("thething.i18n", STORE_JSON)?;
        test.write_file(
            ".babeljobrc.json",
            r#"{
  "locales": ["en", "da", "de"],
  "referenceLocale": "en",
  "store": "thething.i18n",
  "reference": "reference.json"
}"#,
        )?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn make_job_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("make-job");
        cmd
    }

    pub fn apply_job_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("apply-job");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    pub fn read_json(&self, path: &str) -> Result<Value> {
        let content = self.read_file(path)?;
        serde_json::from_str(&content).with_context(|| format!("{} is not valid JSON", path))
    }
}

/// Run a command, failing with its output if it cannot be spawned.
pub fn run(mut cmd: Command) -> Result<Output> {
    cmd.output().context("Failed to run babeljob")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
