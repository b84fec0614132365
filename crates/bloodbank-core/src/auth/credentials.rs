use anyhow::{Context, Result};
use keyring::Entry;

use crate::config::APP_NAME;

/// Remembered admin passwords in the OS keychain, keyed by admin name.
pub struct CredentialStore;

impl CredentialStore {
    /// Remember the password for an admin name
    pub fn store(name: &str, password: &str) -> Result<()> {
        let entry = Entry::new(APP_NAME, name).context("Failed to create keyring entry")?;
        entry
            .set_password(password)
            .context("Failed to store password in keychain")?;
        Ok(())
    }

    /// Retrieve the remembered password for an admin name
    pub fn get_password(name: &str) -> Result<String> {
        let entry = Entry::new(APP_NAME, name).context("Failed to create keyring entry")?;
        entry
            .get_password()
            .context("Failed to retrieve password from keychain")
    }

    /// Forget the password for an admin name
    pub fn delete(name: &str) -> Result<()> {
        let entry = Entry::new(APP_NAME, name).context("Failed to create keyring entry")?;
        entry
            .delete_credential()
            .context("Failed to delete credential from keychain")?;
        Ok(())
    }
}
