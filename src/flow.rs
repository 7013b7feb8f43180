//! Navigation between sign-in, scope selection, and the dashboard.

use crate::auth::Session;
use crate::scope::{AcademicScope, ScopeStore};

/// Where the operator is in the login -> scope -> dashboard flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Unauthenticated,
    AwaitingScope,
    Ready(AcademicScope),
}

impl FlowState {
    pub fn name(&self) -> &'static str {
        match self {
            FlowState::Unauthenticated => "Unauthenticated",
            FlowState::AwaitingScope => "AwaitingScope",
            FlowState::Ready(_) => "Ready",
        }
    }
}

/// Drives [`FlowState`] from session changes and scope confirmation.
pub struct FlowController {
    state: FlowState,
    scopes: ScopeStore,
}

impl FlowController {
    /// Start from the session present at startup, if any.
    pub fn start(session: Option<&Session>, scopes: ScopeStore) -> Self {
        let mut flow = Self {
            state: FlowState::Unauthenticated,
            scopes,
        };
        flow.on_session_changed(session);
        flow
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Active scope when the dashboard is reachable.
    pub fn scope(&self) -> Option<AcademicScope> {
        match self.state {
            FlowState::Ready(scope) => Some(scope),
            _ => None,
        }
    }

    /// React to a session notification. Returns true if the state changed.
    ///
    /// Repeated notifications for the same presence are ignored.
    pub fn on_session_changed(&mut self, session: Option<&Session>) -> bool {
        match (session.is_some(), self.state) {
            (true, FlowState::Unauthenticated) => self.enter_awaiting_scope(),
            (false, FlowState::AwaitingScope | FlowState::Ready(_)) => self.transition(FlowState::Unauthenticated),
            _ => false,
        }
    }

    /// React to a confirmed scope. Ignored unless signed in.
    pub fn on_scope_confirmed(&mut self, scope: AcademicScope) -> bool {
        match self.state {
            FlowState::Unauthenticated => false,
            FlowState::Ready(current) if current == scope => false,
            _ => self.transition(FlowState::Ready(scope)),
        }
    }

    /// Go back to scope selection from the dashboard.
    ///
    /// The persisted scope stays until a new selection is confirmed.
    pub fn on_change_scope(&mut self) -> bool {
        match self.state {
            FlowState::Ready(_) => self.transition(FlowState::AwaitingScope),
            _ => false,
        }
    }

    /// Enter scope selection, skipping ahead when a scope is already persisted.
    fn enter_awaiting_scope(&mut self) -> bool {
        let persisted = match self.scopes.load() {
            Ok(scope) => scope,
            Err(e) => {
                tracing::warn!("Failed to read persisted scope: {}", e);
                None
            }
        };

        match persisted {
            Some(scope) => self.transition(FlowState::Ready(scope)),
            None => self.transition(FlowState::AwaitingScope),
        }
    }

    fn transition(&mut self, next: FlowState) -> bool {
        if self.state == next {
            return false;
        }
        tracing::info!("Flow: {} -> {}", self.state.name(), next.name());
        self.state = next;
        true
    }
}
