use std::sync::Mutex;

/// Input field identifiers shared with the host page.
pub const MESSAGE_FIELD: &str = "message";
pub const USER_ID_FIELD: &str = "user_id";
pub const PASSWORD_FIELD: &str = "password";
pub const AUTH_MESSAGE_FIELD: &str = "auth_message";

/// Output region identifiers shared with the host page.
pub const SIGNATURE_OUTPUT: &str = "signature-output";
pub const MFA_OUTPUT: &str = "mfa-output";

/// Read side of the host page: named input fields plus the modal prompt.
///
/// Field values are read as-is at the moment an action fires; empty fields
/// read as the empty string and no trimming is applied.
pub trait PageInputs: Send + Sync {
    /// Current content of the field with the given identifier.
    fn field_value(&self, id: &str) -> String;

    /// Modal prompt for a value, blocking until the operator answers.
    /// Returns `None` when the prompt is cancelled.
    fn prompt(&self, label: &str) -> Option<String>;
}

/// A named text cell the backend response is rendered into.
///
/// Writes are guarded by a generation counter: `begin` reserves a ticket and
/// marks it as the latest issued for the region, and `commit` applies a write
/// only while its ticket is still the latest. Concurrent actions targeting
/// the same region therefore resolve last-issued-wins instead of racing on
/// response arrival order.
pub struct OutputRegion {
    id: &'static str,
    state: Mutex<RegionState>,
}

#[derive(Default)]
struct RegionState {
    latest_issued: u64,
    text: Option<String>,
}

impl OutputRegion {
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            state: Mutex::new(RegionState::default()),
        }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Reserve the next write ticket for this region.
    pub fn begin(&self) -> u64 {
        let mut state = self.lock();
        state.latest_issued += 1;
        state.latest_issued
    }

    /// Apply a write if `ticket` is still the latest issued. Returns whether
    /// the write was applied.
    pub fn commit(&self, ticket: u64, text: String) -> bool {
        let mut state = self.lock();
        if ticket == state.latest_issued {
            state.text = Some(text);
            true
        } else {
            false
        }
    }

    /// Current content, `None` until the first committed write.
    pub fn text(&self) -> Option<String> {
        self.lock().text.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RegionState> {
        self.state.lock().expect("output region lock poisoned")
    }
}
