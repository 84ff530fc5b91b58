/// Profile of a user as published by the key transparency server
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct User<H> {
    pub user_id: String,

    #[serde(default, with = "hex::serde")]
    pub public_key_data: Vec<u8>,

    /// Keys allowed to sign updates to this profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorized_keys: Option<H>,
}

impl<H> User<H> {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            public_key_data: Vec::new(),
            authorized_keys: None,
        }
    }

    pub fn with_public_key_data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.public_key_data = data.into();
        self
    }

    pub fn with_authorized_keys(mut self, keys: H) -> Self {
        self.authorized_keys = Some(keys);
        self
    }
}
