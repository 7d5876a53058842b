//! Wizard state machine: form state, step navigation, login and submission.
//!
//! - Section updates are pure merges; they clear stored errors for the active
//!   step unconditionally (editing does not have to fix the problem)
//! - `next()` advances only when the current step validates clean
//! - One authorization predicate (`is_authenticated`) backs both the step-1
//!   validator and the render guard for step 2
//! - `login`/`submit` each carry an in-flight flag so re-entry is a no-op

use crate::domain::{
    AuthSession, BusinessProfileUpdate, DomainError, RegistrationRecord, Role, StepErrors,
    WizardStep, validate_step,
};
use crate::ports::{AuthGateway, RegistrationGateway, TokenStore, USER_ROLE_KEY};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Result of a guarded transition (`next` or `submit`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Validation passed; the wizard moved on (or the submission went out).
    Advanced,
    /// Validation failed; the error map for the step was stored and the
    /// wizard stayed put.
    Blocked,
}

/// Wizard service. Single-threaded interactive flow; the only suspension
/// points are the two network calls.
pub struct WizardService {
    auth: Arc<dyn AuthGateway>,
    registration: Arc<dyn RegistrationGateway>,
    tokens: Arc<dyn TokenStore>,

    record: RegistrationRecord,
    step: WizardStep,
    errors: HashMap<WizardStep, StepErrors>,
    session: Option<AuthSession>,
    login_error: Option<String>,
    login_in_flight: bool,
    submit_in_flight: bool,
    redirect_delay: Duration,
}

impl WizardService {
    pub fn new(
        auth: Arc<dyn AuthGateway>,
        registration: Arc<dyn RegistrationGateway>,
        tokens: Arc<dyn TokenStore>,
        redirect_delay: Duration,
    ) -> Self {
        Self {
            auth,
            registration,
            tokens,
            record: RegistrationRecord::default(),
            step: WizardStep::default(),
            errors: HashMap::new(),
            session: None,
            login_error: None,
            login_in_flight: false,
            submit_in_flight: false,
            redirect_delay,
        }
    }

    pub fn record(&self) -> &RegistrationRecord {
        &self.record
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Stored validation errors for a step, if any.
    pub fn errors_for(&self, step: WizardStep) -> Option<&StepErrors> {
        self.errors.get(&step)
    }

    /// The current login failure message, shown near the login form.
    pub fn login_error(&self) -> Option<&str> {
        self.login_error.as_deref()
    }

    /// The single authorization predicate: both the step-1 validator and the
    /// step-2 render guard answer through this.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&AuthSession> {
        self.session.as_ref()
    }

    /// Delay between a successful submission and the shell's redirect/exit.
    pub fn redirect_delay(&self) -> Duration {
        self.redirect_delay
    }

    // ── Form state store ────────────────────────────────────────────────────

    /// Update the step-1 section. Pure merge; clears errors for the active
    /// step unconditionally.
    pub fn select_role(&mut self, role: Role) {
        self.record.role = role;
        self.errors.remove(&self.step);
    }

    /// Merge a partial edit into the step-2 section. The role section and the
    /// step index are untouched; errors for the active step are cleared
    /// whether or not the edit fixes them.
    pub fn update_profile(&mut self, update: BusinessProfileUpdate) {
        self.record.profile.apply(update);
        self.errors.remove(&self.step);
    }

    /// Restore the record to its defaults and drop all stored errors. The
    /// session is kept: resetting the form does not log the operator out.
    pub fn reset(&mut self) {
        self.record = RegistrationRecord::default();
        self.errors.clear();
    }

    // ── Navigation controller ───────────────────────────────────────────────

    /// Validate the current step; advance on a clean result, otherwise store
    /// the error map and stay.
    pub fn next(&mut self) -> StepOutcome {
        let errors = validate_step(self.step, &self.record, self.session.as_ref());
        if errors.is_empty() {
            self.errors.remove(&self.step);
            self.step = self.step.next();
            StepOutcome::Advanced
        } else {
            self.errors.insert(self.step, errors);
            StepOutcome::Blocked
        }
    }

    /// Retreat one step. Unconditional, no validation.
    pub fn previous(&mut self) {
        self.step = self.step.previous();
    }

    // ── Authentication ──────────────────────────────────────────────────────

    /// Log in with the currently selected role. On success: persist the token
    /// under the role's key, delete the other role's key (at most one token
    /// pair may exist), record the role marker, clear any prior login error
    /// and advance to the profile step. A success response with no token is a
    /// no-op: no storage writes, session unchanged.
    ///
    /// Every failure leaving this method, gateway or storage, is recorded as
    /// the current login-error message for the shell to render.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), DomainError> {
        if self.login_in_flight {
            return Ok(());
        }
        self.login_in_flight = true;
        let role = self.record.role;
        let result = self.try_login(role, username, password).await;
        self.login_in_flight = false;

        if let Err(err) = &result {
            self.login_error = Some(err.message().to_string());
        }
        result
    }

    async fn try_login(
        &mut self,
        role: Role,
        username: &str,
        password: &str,
    ) -> Result<(), DomainError> {
        match self.auth.login(role, username, password).await? {
            None => {
                warn!(%role, "login response had no token; leaving session unchanged");
                Ok(())
            }
            Some(token) => {
                // Evict the other role's token before storing the new one: if
                // persistence fails midway, storage holds at most one token.
                self.tokens.delete(role.other().storage_key()).await?;
                self.tokens.set(role.storage_key(), &token).await?;
                self.tokens.set(USER_ROLE_KEY, role.as_str()).await?;
                self.session = Some(AuthSession { role, token });
                self.login_error = None;
                self.step = WizardStep::Profile;
                info!(%role, "logged in");
                Ok(())
            }
        }
    }

    // ── Submission ──────────────────────────────────────────────────────────

    /// Re-run the step-2 validator, then POST the profile with the bearer
    /// token for the authenticated role. `Ok(Blocked)` means validation
    /// failed and the error map was stored; the form data survives either way
    /// so a failed call can be retried.
    pub async fn submit(&mut self) -> Result<StepOutcome, DomainError> {
        if self.submit_in_flight {
            return Ok(StepOutcome::Blocked);
        }

        let errors = validate_step(WizardStep::Profile, &self.record, self.session.as_ref());
        if !errors.is_empty() {
            self.errors.insert(WizardStep::Profile, errors);
            return Ok(StepOutcome::Blocked);
        }

        let session = self
            .session
            .as_ref()
            .ok_or_else(|| DomainError::Auth("Not logged in".into()))?;
        let token = self
            .tokens
            .get(session.role.storage_key())
            .await?
            .ok_or_else(|| DomainError::Auth("Stored token missing; log in again".into()))?;

        self.submit_in_flight = true;
        let result = self.registration.register(&self.record.profile, &token).await;
        self.submit_in_flight = false;
        result?;

        info!(name = %self.record.profile.name, "vendor registered");
        Ok(StepOutcome::Advanced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::MemoryTokenStore;
    use crate::domain::{BusinessProfile, GENERAL};
    use std::sync::Mutex;

    /// Scripted auth gateway: pops one canned outcome per login call.
    struct ScriptedAuth {
        outcomes: Mutex<Vec<Result<Option<String>, String>>>,
    }

    impl ScriptedAuth {
        fn always(token: &str) -> Arc<Self> {
            Arc::new(Self {
                outcomes: Mutex::new(vec![Ok(Some(token.to_string())); 8]),
            })
        }

        fn script(outcomes: Vec<Result<Option<String>, String>>) -> Arc<Self> {
            Arc::new(Self {
                outcomes: Mutex::new(outcomes),
            })
        }
    }

    #[async_trait::async_trait]
    impl AuthGateway for ScriptedAuth {
        async fn login(
            &self,
            _role: Role,
            _username: &str,
            _password: &str,
        ) -> Result<Option<String>, DomainError> {
            let mut outcomes = self.outcomes.lock().unwrap();
            match outcomes.remove(0) {
                Ok(token) => Ok(token),
                Err(msg) => Err(DomainError::Auth(msg)),
            }
        }
    }

    /// Records every registration call for assertions.
    #[derive(Default)]
    struct RecordingRegistration {
        calls: Mutex<Vec<(BusinessProfile, String)>>,
    }

    #[async_trait::async_trait]
    impl RegistrationGateway for RecordingRegistration {
        async fn register(
            &self,
            profile: &BusinessProfile,
            token: &str,
        ) -> Result<(), DomainError> {
            self.calls
                .lock()
                .unwrap()
                .push((profile.clone(), token.to_string()));
            Ok(())
        }
    }

    /// Token store whose `delete` always fails; `get`/`set` pass through.
    #[derive(Default)]
    struct BrokenDeleteStore {
        inner: MemoryTokenStore,
    }

    #[async_trait::async_trait]
    impl TokenStore for BrokenDeleteStore {
        async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
            self.inner.set(key, value).await
        }

        async fn delete(&self, _key: &str) -> Result<(), DomainError> {
            Err(DomainError::TokenStore("store unavailable".into()))
        }
    }

    fn wizard_with(
        auth: Arc<dyn AuthGateway>,
        registration: Arc<RecordingRegistration>,
        tokens: Arc<dyn TokenStore>,
    ) -> WizardService {
        WizardService::new(auth, registration, tokens, Duration::ZERO)
    }

    fn wizard() -> (WizardService, Arc<RecordingRegistration>, Arc<MemoryTokenStore>) {
        let registration = Arc::new(RecordingRegistration::default());
        let tokens = Arc::new(MemoryTokenStore::new());
        let w = wizard_with(ScriptedAuth::always("tok-1"), registration.clone(), tokens.clone());
        (w, registration, tokens)
    }

    fn fill_required(w: &mut WizardService) {
        w.update_profile(BusinessProfileUpdate {
            name: Some("Kebapchi".into()),
            mobile: Some("+90 555 000 0000".into()),
            email: Some("owner@kebapchi.example".into()),
            password: Some("hunter2".into()),
            full_address: Some("1 Liman Cd, Istanbul".into()),
            latitude: Some("41.01".into()),
            longitude: Some("28.97".into()),
            ..Default::default()
        });
    }

    #[test]
    fn profile_update_leaves_role_section_untouched() {
        let (mut w, _, _) = wizard();
        w.select_role(Role::Employee);
        w.update_profile(BusinessProfileUpdate {
            name: Some("Kebapchi".into()),
            ..Default::default()
        });
        assert_eq!(w.record().role, Role::Employee);
        assert_eq!(w.record().profile.name, "Kebapchi");
        // Untouched fields keep their defaults.
        assert_eq!(w.record().profile.city, "");
        assert!(w.record().profile.categories.is_empty());
    }

    #[tokio::test]
    async fn editing_clears_step_errors_even_without_fixing_them() {
        let (mut w, _, _) = wizard();
        w.login("agent", "pw").await.unwrap();
        assert_eq!(w.step(), WizardStep::Profile);

        // Blank profile: submit blocks and stores errors.
        assert_eq!(w.submit().await.unwrap(), StepOutcome::Blocked);
        assert!(w.errors_for(WizardStep::Profile).is_some());

        // An edit that fixes nothing still clears the stored errors.
        w.update_profile(BusinessProfileUpdate {
            landmark: Some("by the pier".into()),
            ..Default::default()
        });
        assert!(w.errors_for(WizardStep::Profile).is_none());
    }

    #[test]
    fn next_blocks_on_step1_until_authenticated() {
        let (mut w, _, _) = wizard();
        assert_eq!(w.next(), StepOutcome::Blocked);
        assert_eq!(w.step(), WizardStep::RoleAuth);
        let errors = w.errors_for(WizardStep::RoleAuth).unwrap();
        assert_eq!(
            errors.get(GENERAL).map(String::as_str),
            Some("Please login as agent to proceed")
        );
    }

    #[tokio::test]
    async fn next_advances_by_one_and_caps_at_profile() {
        let (mut w, _, _) = wizard();
        w.login("agent", "pw").await.unwrap();
        w.previous();
        assert_eq!(w.step(), WizardStep::RoleAuth);
        assert_eq!(w.next(), StepOutcome::Advanced);
        assert_eq!(w.step(), WizardStep::Profile);

        // Capped: a clean step 2 still cannot advance past itself.
        fill_required(&mut w);
        assert_eq!(w.next(), StepOutcome::Advanced);
        assert_eq!(w.step(), WizardStep::Profile);
    }

    #[test]
    fn previous_is_unconditional_and_floored() {
        let (mut w, _, _) = wizard();
        w.previous();
        assert_eq!(w.step(), WizardStep::RoleAuth);
    }

    #[tokio::test]
    async fn login_for_one_role_evicts_the_other_roles_token() {
        let registration = Arc::new(RecordingRegistration::default());
        let tokens = Arc::new(MemoryTokenStore::new());
        let auth = ScriptedAuth::script(vec![
            Ok(Some("emp-tok".into())),
            Ok(Some("agent-tok".into())),
        ]);
        let mut w = wizard_with(auth, registration, tokens.clone());

        w.select_role(Role::Employee);
        w.login("emp", "pw").await.unwrap();
        assert_eq!(
            tokens.get("employeeToken").await.unwrap().as_deref(),
            Some("emp-tok")
        );

        w.previous();
        w.select_role(Role::Agent);
        w.login("agent", "pw").await.unwrap();
        assert_eq!(tokens.get("employeeToken").await.unwrap(), None);
        assert_eq!(
            tokens.get("agentToken").await.unwrap().as_deref(),
            Some("agent-tok")
        );
        assert_eq!(
            tokens.get(USER_ROLE_KEY).await.unwrap().as_deref(),
            Some("agent")
        );
    }

    #[tokio::test]
    async fn login_failure_records_the_message_and_stays_put() {
        let registration = Arc::new(RecordingRegistration::default());
        let tokens = Arc::new(MemoryTokenStore::new());
        let auth = ScriptedAuth::script(vec![Err("Invalid credentials".into())]);
        let mut w = wizard_with(auth, registration, tokens);

        assert!(w.login("agent", "wrong").await.is_err());
        assert_eq!(w.login_error(), Some("Invalid credentials"));
        assert!(!w.is_authenticated());
        assert_eq!(w.step(), WizardStep::RoleAuth);
    }

    #[tokio::test]
    async fn tokenless_success_is_a_noop() {
        let registration = Arc::new(RecordingRegistration::default());
        let tokens = Arc::new(MemoryTokenStore::new());
        let auth = ScriptedAuth::script(vec![Ok(None)]);
        let mut w = wizard_with(auth, registration, tokens.clone());

        w.login("agent", "pw").await.unwrap();
        assert!(!w.is_authenticated());
        assert_eq!(w.step(), WizardStep::RoleAuth);
        assert!(tokens.is_empty().await);
    }

    #[tokio::test]
    async fn storage_failure_during_login_is_recorded_for_the_shell() {
        let registration = Arc::new(RecordingRegistration::default());
        let store = Arc::new(BrokenDeleteStore::default());
        let mut w = wizard_with(ScriptedAuth::always("tok"), registration, store.clone());

        let err = w.login("agent", "pw").await.unwrap_err();
        assert_eq!(w.login_error(), Some("store unavailable"));
        assert_eq!(err.message(), "store unavailable");
        assert!(!w.is_authenticated());
        assert_eq!(w.step(), WizardStep::RoleAuth);
    }

    #[tokio::test]
    async fn storage_failure_during_login_never_leaves_two_tokens() {
        let registration = Arc::new(RecordingRegistration::default());
        let store = Arc::new(BrokenDeleteStore::default());
        store.inner.set("employeeToken", "old-emp").await.unwrap();
        let mut w = wizard_with(ScriptedAuth::always("tok"), registration, store.clone());

        assert!(w.login("agent", "pw").await.is_err());

        // Eviction runs before the new token is stored, so the failed delete
        // leaves the old token alone and never writes the new one.
        assert_eq!(store.inner.get("agentToken").await.unwrap(), None);
        assert_eq!(
            store.inner.get("employeeToken").await.unwrap().as_deref(),
            Some("old-emp")
        );
    }

    #[tokio::test]
    async fn successful_login_clears_a_prior_login_error() {
        let registration = Arc::new(RecordingRegistration::default());
        let tokens = Arc::new(MemoryTokenStore::new());
        let auth = ScriptedAuth::script(vec![
            Err("Invalid credentials".into()),
            Ok(Some("tok".into())),
        ]);
        let mut w = wizard_with(auth, registration, tokens);

        let _ = w.login("agent", "wrong").await;
        assert!(w.login_error().is_some());
        w.login("agent", "right").await.unwrap();
        assert_eq!(w.login_error(), None);
        assert!(w.is_authenticated());
    }

    #[tokio::test]
    async fn submit_sends_one_call_with_the_roles_stored_token() {
        let (mut w, registration, _) = wizard();
        w.login("agent", "pw").await.unwrap();
        fill_required(&mut w);

        assert_eq!(w.submit().await.unwrap(), StepOutcome::Advanced);
        let calls = registration.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (profile, token) = &calls[0];
        assert_eq!(token, "tok-1");
        assert_eq!(profile.name, "Kebapchi");
        assert!(profile.categories.is_empty());
    }

    #[tokio::test]
    async fn submit_blocks_and_stores_errors_when_invalid() {
        let (mut w, registration, _) = wizard();
        w.login("agent", "pw").await.unwrap();
        assert_eq!(w.submit().await.unwrap(), StepOutcome::Blocked);
        assert!(registration.calls.lock().unwrap().is_empty());
        assert_eq!(w.errors_for(WizardStep::Profile).unwrap().len(), 6);
    }

    #[tokio::test]
    async fn reset_restores_defaults_but_keeps_the_session() {
        let (mut w, _, _) = wizard();
        w.login("agent", "pw").await.unwrap();
        fill_required(&mut w);
        w.reset();
        assert_eq!(w.record(), &RegistrationRecord::default());
        assert!(w.is_authenticated());
    }
}
