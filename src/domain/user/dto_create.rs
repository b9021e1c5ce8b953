use chrono::NaiveDate;

/// Validated signup data, password already hashed.
#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone_number: String,
    pub gender: String,
    pub date_of_birth: NaiveDate,
    pub membership_status: String,
}
