//! Account related type definitions

use serde::{Deserialize, Deserializer, Serialize};

use super::Label;

/// Account type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    /// Externally authenticated, carries no password
    #[serde(rename = "LDAP")]
    Ldap,
    /// Password-bearing local account (older data stores the localized name)
    #[serde(rename = "Local", alias = "Локальная")]
    Local,
}

impl AccountType {
    /// Wire name of the variant
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ldap => "LDAP",
            Self::Local => "Local",
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Managed credential record
///
/// `id` is assigned by the caller. The store never generates or deduplicates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Record ID
    pub id: String,
    /// Labels in display order
    #[serde(default)]
    pub labels: Vec<Label>,
    /// Account type
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Login name
    pub login: String,
    /// Password (`None` for LDAP by convention)
    pub password: Option<String>,
}

impl UserAccount {
    /// Create an LDAP account (no password)
    #[must_use]
    pub fn ldap(id: impl Into<String>, login: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            labels: Vec::new(),
            account_type: AccountType::Ldap,
            login: login.into(),
            password: None,
        }
    }

    /// Create a local account with a password
    #[must_use]
    pub fn local(
        id: impl Into<String>,
        login: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            labels: Vec::new(),
            account_type: AccountType::Local,
            login: login.into(),
            password: Some(password.into()),
        }
    }

    /// Replace the labels (builder style)
    #[must_use]
    pub fn with_labels(mut self, labels: Vec<Label>) -> Self {
        self.labels = labels;
        self
    }

    /// Whether the password matches the account type convention
    /// (LDAP without password, Local with one).
    ///
    /// Informational only: the store accepts records either way.
    #[must_use]
    pub fn follows_password_convention(&self) -> bool {
        match self.account_type {
            AccountType::Ldap => self.password.is_none(),
            AccountType::Local => self.password.is_some(),
        }
    }
}

/// Partial account update
///
/// Fields left as `None` keep their current value. `password` is a double
/// option: `Some(None)` clears the password, `None` leaves it alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccountUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<Label>>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub account_type: Option<AccountType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,

    /// JSON `null` means "clear", a missing key means "keep"
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub password: Option<Option<String>>,
}

impl UserAccountUpdate {
    /// Update only the labels
    #[must_use]
    pub fn labels(labels: Vec<Label>) -> Self {
        Self {
            labels: Some(labels),
            ..Self::default()
        }
    }

    /// Whether no field is present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.labels.is_none()
            && self.account_type.is_none()
            && self.login.is_none()
            && self.password.is_none()
    }

    /// Apply the update to an existing account (shallow merge)
    pub fn apply_to(&self, account: &mut UserAccount) {
        if let Some(ref id) = self.id {
            account.id.clone_from(id);
        }
        if let Some(ref labels) = self.labels {
            account.labels.clone_from(labels);
        }
        if let Some(account_type) = self.account_type {
            account.account_type = account_type;
        }
        if let Some(ref login) = self.login {
            account.login.clone_from(login);
        }
        if let Some(ref password) = self.password {
            account.password.clone_from(password);
        }
    }
}

/// Distinguishes an explicit `null` from a missing key.
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_wire_format() {
        let account = UserAccount::ldap("1", "bob").with_labels(vec![Label::new("prod")]);
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "1",
                "labels": [{ "text": "prod" }],
                "type": "LDAP",
                "login": "bob",
                "password": null
            })
        );
    }

    #[test]
    fn local_type_accepts_localized_name() {
        let json = r#"{"id":"2","labels":[],"type":"Локальная","login":"alice","password":"pw"}"#;
        let account: UserAccount = serde_json::from_str(json).unwrap();
        assert_eq!(account.account_type, AccountType::Local);
        assert_eq!(
            serde_json::to_value(account.account_type).unwrap(),
            serde_json::json!("Local")
        );
    }

    #[test]
    fn unknown_type_is_rejected() {
        let json = r#"{"id":"3","labels":[],"type":"Kerberos","login":"x","password":null}"#;
        assert!(serde_json::from_str::<UserAccount>(json).is_err());
    }

    #[test]
    fn password_convention() {
        assert!(UserAccount::ldap("1", "bob").follows_password_convention());
        assert!(UserAccount::local("2", "alice", "pw").follows_password_convention());

        let mut odd = UserAccount::ldap("3", "carol");
        odd.password = Some("leftover".to_string());
        assert!(!odd.follows_password_convention());
    }

    #[test]
    fn update_distinguishes_null_from_missing() {
        let clear: UserAccountUpdate = serde_json::from_str(r#"{"password":null}"#).unwrap();
        assert_eq!(clear.password, Some(None));

        let keep: UserAccountUpdate = serde_json::from_str(r#"{"login":"bob"}"#).unwrap();
        assert_eq!(keep.password, None);
        assert_eq!(keep.login.as_deref(), Some("bob"));
    }

    #[test]
    fn apply_to_partial_update() {
        let mut account = UserAccount::local("1", "alice", "secret")
            .with_labels(vec![Label::new("old")]);

        let update = UserAccountUpdate {
            account_type: Some(AccountType::Ldap),
            password: Some(None),
            ..UserAccountUpdate::default()
        };
        update.apply_to(&mut account);

        assert_eq!(account.account_type, AccountType::Ldap);
        assert_eq!(account.password, None);
        assert_eq!(account.login, "alice");
        assert_eq!(account.labels, vec![Label::new("old")]);
    }

    #[test]
    fn apply_to_overwrites_with_empty_values() {
        let mut account = UserAccount::ldap("1", "bob").with_labels(vec![Label::new("a")]);

        let update = UserAccountUpdate {
            labels: Some(Vec::new()),
            login: Some(String::new()),
            ..UserAccountUpdate::default()
        };
        update.apply_to(&mut account);

        assert!(account.labels.is_empty());
        assert_eq!(account.login, "");
    }

    #[test]
    fn empty_update_changes_nothing() {
        let update = UserAccountUpdate::default();
        assert!(update.is_empty());

        let original = UserAccount::local("1", "alice", "pw");
        let mut account = original.clone();
        update.apply_to(&mut account);
        assert_eq!(account, original);
    }
}
