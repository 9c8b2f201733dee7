use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::persistence::PersistencePort;
use super::provider::{IdentityProvider, Role, User};
use crate::error::AdminError;

pub const USER_KEY: &str = "currentUser";
pub const ROLE_KEY: &str = "currentRole";
pub const MAJOR_KEY: &str = "currentMajor";
pub const STUDENT_KEY: &str = "currentStudentId";

pub type SharedIdentity = Arc<RwLock<IdentityContext>>;

/// Acting identity plus the ambient selectors the dashboard works under.
/// Every mutation is written through to the persistence port.
pub struct IdentityContext {
    port: Arc<dyn PersistencePort>,
    provider: Arc<dyn IdentityProvider>,
    user: Option<User>,
    current_role: Option<Role>,
    current_major: Option<String>,
    current_student_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentitySnapshot {
    pub user: Option<User>,
    pub current_role: Option<Role>,
    pub current_major: Option<String>,
    pub current_student_id: Option<String>,
    pub is_authenticated: bool,
    pub is_admin: bool,
    pub is_advisor: bool,
    pub is_student: bool,
}

impl IdentityContext {
    /// Build a context, rehydrating whatever the port holds. Unreadable entries are
    /// dropped with a warning; an unreadable store reads as empty at the port.
    pub fn load(
        port: Arc<dyn PersistencePort>,
        provider: Arc<dyn IdentityProvider>,
    ) -> Result<Self, AdminError> {
        let user = match port.load(USER_KEY)? {
            Some(raw) => serde_json::from_str::<User>(&raw)
                .inspect_err(|e| warn!(error = %e, "discarding unreadable persisted user"))
                .ok(),
            None => None,
        };
        let current_role = match port.load(ROLE_KEY)? {
            Some(raw) => raw
                .parse::<Role>()
                .inspect_err(|e| warn!(error = %e, "discarding unreadable persisted role"))
                .ok(),
            None => None,
        };
        let current_major = port.load(MAJOR_KEY)?;
        let current_student_id = port.load(STUDENT_KEY)?;

        Ok(Self {
            port,
            provider,
            user,
            current_role,
            current_major,
            current_student_id,
        })
    }

    pub fn into_shared(self) -> SharedIdentity {
        Arc::new(RwLock::new(self))
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn current_role(&self) -> Option<Role> {
        self.current_role
    }

    pub fn current_major(&self) -> Option<&str> {
        self.current_major.as_deref()
    }

    pub fn current_student_id(&self) -> Option<&str> {
        self.current_student_id.as_deref()
    }

    pub fn is_admin(&self) -> bool {
        self.current_role == Some(Role::Admin)
    }

    pub fn is_advisor(&self) -> bool {
        self.current_role == Some(Role::Advisor)
    }

    pub fn is_student(&self) -> bool {
        self.current_role == Some(Role::Student)
    }

    pub fn snapshot(&self) -> IdentitySnapshot {
        IdentitySnapshot {
            user: self.user.clone(),
            current_role: self.current_role,
            current_major: self.current_major.clone(),
            current_student_id: self.current_student_id.clone(),
            is_authenticated: self.user.is_some(),
            is_admin: self.is_admin(),
            is_advisor: self.is_advisor(),
            is_student: self.is_student(),
        }
    }

    pub fn login(&mut self, role: Role, name: &str) -> Result<&User, AdminError> {
        let user = self.provider.sign_in(role, name)?;
        self.persist_user(&user)?;
        info!(user_id = %user.id, %role, "identity signed in");
        self.current_role = Some(role);
        Ok(self.user.insert(user))
    }

    /// Clears the user, the role and both selectors.
    pub fn logout(&mut self) -> Result<(), AdminError> {
        for key in [USER_KEY, ROLE_KEY, MAJOR_KEY, STUDENT_KEY] {
            self.port.remove(key)?;
        }
        if let Some(user) = self.user.take() {
            info!(user_id = %user.id, "identity signed out");
        }
        self.current_role = None;
        self.current_major = None;
        self.current_student_id = None;
        Ok(())
    }

    /// Role switcher for the signed-in user.
    pub fn switch_role(&mut self, role: Role) -> Result<(), AdminError> {
        let Some(current) = self.user.as_ref() else {
            return Err(AdminError::Invalid("No user is signed in".to_string()));
        };
        let mut user = current.clone();
        user.role = role;
        self.persist_user(&user)?;
        self.user = Some(user);
        self.current_role = Some(role);
        Ok(())
    }

    /// Writes the user and role keys as a pair. When the role write fails the
    /// previous user entry is put back, so the two keys never disagree.
    fn persist_user(&self, user: &User) -> Result<(), AdminError> {
        let previous = self.port.load(USER_KEY)?;
        self.port.save(USER_KEY, &serde_json::to_string(user)?)?;
        if let Err(e) = self.port.save(ROLE_KEY, user.role.as_str()) {
            if let Err(restore) =
                store_optional(self.port.as_ref(), USER_KEY, previous.as_deref())
            {
                warn!(error = %restore, "failed to restore the persisted user");
            }
            return Err(e);
        }
        Ok(())
    }

    pub fn set_current_major(&mut self, major: Option<String>) -> Result<(), AdminError> {
        store_optional(self.port.as_ref(), MAJOR_KEY, major.as_deref())?;
        self.current_major = major;
        Ok(())
    }

    pub fn set_current_student_id(&mut self, student_id: Option<String>) -> Result<(), AdminError> {
        store_optional(self.port.as_ref(), STUDENT_KEY, student_id.as_deref())?;
        self.current_student_id = student_id;
        Ok(())
    }
}

fn store_optional(
    port: &dyn PersistencePort,
    key: &str,
    value: Option<&str>,
) -> Result<(), AdminError> {
    match value {
        Some(v) => port.save(key, v),
        None => port.remove(key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::persistence::MemoryPersistence;
    use crate::identity::persistence::FilePersistence;
    use crate::identity::provider::DemoIdentityProvider;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Memory port whose role writes can be made to fail.
    #[derive(Default)]
    struct FlakyRolePort {
        inner: MemoryPersistence,
        fail_role: AtomicBool,
    }

    impl PersistencePort for FlakyRolePort {
        fn load(&self, key: &str) -> Result<Option<String>, AdminError> {
            self.inner.load(key)
        }

        fn save(&self, key: &str, value: &str) -> Result<(), AdminError> {
            if key == ROLE_KEY && self.fail_role.load(Ordering::SeqCst) {
                return Err(AdminError::Io(std::io::Error::other("disk full")));
            }
            self.inner.save(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), AdminError> {
            self.inner.remove(key)
        }
    }

    fn context(port: Arc<MemoryPersistence>) -> IdentityContext {
        IdentityContext::load(port, Arc::new(DemoIdentityProvider::new("university.edu")))
            .unwrap()
    }

    #[test]
    fn fresh_context_is_anonymous() {
        let ctx = context(Arc::new(MemoryPersistence::new()));
        let snap = ctx.snapshot();
        assert!(!snap.is_authenticated);
        assert!(!snap.is_admin && !snap.is_advisor && !snap.is_student);
        assert_eq!(snap.current_role, None);
    }

    #[test]
    fn login_persists_and_rehydrates() {
        let port = Arc::new(MemoryPersistence::new());
        let mut ctx = context(port.clone());
        let user = ctx.login(Role::Advisor, "Jane Doe").unwrap().clone();
        ctx.set_current_major(Some("CS".to_string())).unwrap();
        assert!(ctx.is_advisor());

        let restored = context(port);
        assert_eq!(restored.user(), Some(&user));
        assert_eq!(restored.current_role(), Some(Role::Advisor));
        assert_eq!(restored.current_major(), Some("CS"));
        assert_eq!(restored.user().unwrap().email, "jane.doe@university.edu");
    }

    #[test]
    fn logout_clears_every_key() {
        let port = Arc::new(MemoryPersistence::new());
        let mut ctx = context(port.clone());
        ctx.login(Role::Admin, "Root").unwrap();
        ctx.set_current_major(Some("EE".to_string())).unwrap();
        ctx.set_current_student_id(Some("S9".to_string())).unwrap();

        ctx.logout().unwrap();

        assert!(port.is_empty());
        let snap = ctx.snapshot();
        assert_eq!(snap.user, None);
        assert_eq!(snap.current_major, None);
        assert_eq!(snap.current_student_id, None);
        assert!(!snap.is_admin);
    }

    #[test]
    fn switch_role_requires_a_user() {
        let port = Arc::new(MemoryPersistence::new());
        let mut ctx = context(port.clone());
        assert!(matches!(
            ctx.switch_role(Role::Student),
            Err(AdminError::Invalid(_))
        ));

        ctx.login(Role::Admin, "Root").unwrap();
        ctx.switch_role(Role::Student).unwrap();
        assert!(ctx.is_student());
        assert_eq!(ctx.user().unwrap().role, Role::Student);
        assert_eq!(port.load(ROLE_KEY).unwrap().as_deref(), Some("student"));
    }

    #[test]
    fn corrupt_entries_are_ignored_on_load() {
        let port = Arc::new(MemoryPersistence::with_entries([
            (USER_KEY, "{not json"),
            (ROLE_KEY, "dean"),
            (STUDENT_KEY, "S1"),
        ]));
        let ctx = context(port);
        assert_eq!(ctx.user(), None);
        assert_eq!(ctx.current_role(), None);
        assert_eq!(ctx.current_student_id(), Some("S1"));
    }

    #[test]
    fn failed_role_write_leaves_no_half_login() {
        let port = Arc::new(FlakyRolePort::default());
        let mut ctx = IdentityContext::load(
            port.clone(),
            Arc::new(DemoIdentityProvider::new("university.edu")),
        )
        .unwrap();

        port.fail_role.store(true, Ordering::SeqCst);
        assert!(matches!(ctx.login(Role::Admin, "Root"), Err(AdminError::Io(_))));
        assert_eq!(ctx.user(), None);
        assert_eq!(port.load(USER_KEY).unwrap(), None);

        port.fail_role.store(false, Ordering::SeqCst);
        let signed_in = ctx.login(Role::Admin, "Root").unwrap().clone();
        let stored_user = port.load(USER_KEY).unwrap();

        port.fail_role.store(true, Ordering::SeqCst);
        assert!(ctx.switch_role(Role::Student).is_err());
        assert_eq!(ctx.user(), Some(&signed_in));
        assert!(ctx.is_admin());
        assert_eq!(port.load(USER_KEY).unwrap(), stored_user);
        assert_eq!(port.load(ROLE_KEY).unwrap().as_deref(), Some("admin"));
    }

    #[test]
    fn truncated_identity_file_does_not_block_startup() {
        let mut path = std::env::temp_dir();
        path.push(format!(
            "advising-identity-truncated-{}-{}.json",
            std::process::id(),
            uuid::Uuid::new_v4()
        ));
        std::fs::write(&path, r#"{"currentRole": "adm"#).unwrap();

        let ctx = IdentityContext::load(
            Arc::new(FilePersistence::new(&path)),
            Arc::new(DemoIdentityProvider::new("university.edu")),
        )
        .unwrap();
        assert_eq!(ctx.user(), None);
        assert_eq!(ctx.current_role(), None);

        let _ = std::fs::remove_file(&path);
    }
}
