use git2::{AutotagOption, Cred, CredentialType, FetchOptions, RemoteCallbacks};
use std::fmt;
use std::path::Path;

/// Remote the mirror tracks
pub const DEFAULT_REMOTE: &str = "origin";

/// Give up after this many credential prompts for a single operation
const MAX_CREDENTIAL_ATTEMPTS: usize = 3;

/// Basic credentials for the remote
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub token: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            token: token.into(),
        }
    }

    /// Credentials only when both parts are present and non-empty
    pub fn from_parts(user: Option<&str>, token: Option<&str>) -> Option<Self> {
        match (user, token) {
            (Some(user), Some(token)) if !user.is_empty() && !token.is_empty() => {
                Some(Self::new(user, token))
            }
            _ => None,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Fetch options with authentication wired up.
///
/// Configured basic credentials win when the transport accepts them, SSH
/// transports fall back to keys in `~/.ssh` and then the agent.
pub fn fetch_options(credentials: Option<&Credentials>) -> FetchOptions<'_> {
    let mut callbacks = RemoteCallbacks::new();
    let mut attempts = 0;

    callbacks.credentials(move |_url, username_from_url, allowed_types| {
        attempts += 1;
        if attempts > MAX_CREDENTIAL_ATTEMPTS {
            return Err(git2::Error::from_str("authentication failed"));
        }

        if let Some(creds) = credentials {
            if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
                return Cred::userpass_plaintext(&creds.user, &creds.token);
            }
        }

        if allowed_types.contains(CredentialType::SSH_KEY) {
            return ssh_key_credentials(username_from_url.unwrap_or("git"));
        }

        Cred::default()
    });

    let mut options = FetchOptions::new();
    options.remote_callbacks(callbacks);
    options.download_tags(AutotagOption::All);
    options
}

fn ssh_key_credentials(username: &str) -> Result<Cred, git2::Error> {
    if let Ok(home) = std::env::var("HOME") {
        let ssh_dir = Path::new(&home).join(".ssh");
        for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
            let path = ssh_dir.join(key);
            if path.exists() {
                return Cred::ssh_key(username, None, &path, None);
            }
        }
    }

    Cred::ssh_key_from_agent(username)
}
