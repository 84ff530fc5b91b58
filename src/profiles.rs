use std::path::Path;

use keyexpiry::{AuthorizedKeys, User};
use snafu::ResultExt;

use crate::{CliError, ConnectSnafu, ProfilesSnafu};

pub(crate) type Profile = User<AuthorizedKeys<String>>;

/// Local stand-in for the key transparency server: a JSON array of user profiles
pub(crate) struct ProfileDirectory {
    users: Vec<Profile>,
}

impl ProfileDirectory {
    pub fn open(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path).context(ConnectSnafu { path })?;
        Self::parse(&content).context(ProfilesSnafu { path })
    }

    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        let users = serde_json::from_str(content)?;
        Ok(Self { users })
    }

    pub fn get_user(&self, user_id: &str) -> Option<&Profile> {
        self.users.iter().find(|user| user.user_id == user_id)
    }
}
