use rand::{distributions::Alphanumeric, thread_rng, Rng};

/// Random alphanumeric token used to address quiz and flashcard sessions.
pub fn generate_session_token() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}
