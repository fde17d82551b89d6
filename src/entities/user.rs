/// Read-only view of a user, owned by the broader user subsystem. The avatar
/// pipeline only ever reads it.
#[derive(Debug, Clone)]
pub struct UserIdentity {
    pub id: u64,
    pub name: String,
    pub email: String,
}

pub fn new(id: u64, name: String, email: String) -> UserIdentity {
    UserIdentity { id, name, email }
}
