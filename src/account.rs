// Remembered GitHub account, stored under the user's config directory
use crate::fetcher::validate_account;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct RememberedAccount {
    username: String,
}

pub struct AccountStore {
    path: PathBuf,
}

impl AccountStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in `<config dir>/cgraph/account.json`
    pub fn default_location() -> Result<Self> {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .ok_or_else(|| anyhow!("Could not determine config directory or home directory"))?;

        Ok(Self::at(base.join("cgraph").join("account.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let account: RememberedAccount = serde_json::from_str(&content)
            .with_context(|| format!("Malformed account file {}", self.path.display()))?;

        let username = account.username.trim().to_string();
        Ok((!username.is_empty()).then_some(username))
    }

    pub fn save(&self, username: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&RememberedAccount {
            username: username.to_string(),
        })?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        debug!("Remembered account saved to {}", self.path.display());
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            debug!("Removed {}", self.path.display());
        }
        Ok(())
    }

    /// Remembered account, or ask for one on stdin and remember it
    pub fn load_or_prompt(&self) -> Result<String> {
        let stdin = io::stdin();
        self.load_or_prompt_with(&mut stdin.lock(), &mut io::stdout())
    }

    fn load_or_prompt_with(&self, input: &mut impl BufRead, output: &mut impl Write) -> Result<String> {
        if let Some(username) = self.load()? {
            return Ok(username);
        }

        let username = prompt_username(input, output)?;
        self.save(&username)?;
        Ok(username)
    }
}

fn prompt_username(input: &mut impl BufRead, output: &mut impl Write) -> Result<String> {
    write!(output, "github username> ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let username = line.trim();
    if username.is_empty() {
        return Err(anyhow!("No GitHub username given"));
    }
    validate_account(username)?;
    Ok(username.to_string())
}
