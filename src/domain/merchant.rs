use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Merchant {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_active: bool,
}
