/// Identity snapshot a background profile fetch was issued against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub identity_id: String,
    pub generation: u64,
}
