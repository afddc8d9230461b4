//! Role name constants as they appear in JWT claims and the `users` table.

pub const ROLE_SYSTEM_ADMIN: &str = "System Admin";
pub const ROLE_VETERINARIAN: &str = "Veterinarian";
pub const ROLE_GOVERNMENT_OFFICER: &str = "Government Officer";
pub const ROLE_FARMER: &str = "Farmer";
pub const ROLE_CITIZEN: &str = "Citizen";

/// Roles allowed to perform registry mutations (animal registration,
/// chip assignment/deactivation).
pub const STAFF_ROLES: &[&str] = &[
    ROLE_SYSTEM_ADMIN,
    ROLE_VETERINARIAN,
    ROLE_GOVERNMENT_OFFICER,
];

/// Whether the given role string is a staff role.
pub fn is_staff(role: &str) -> bool {
    STAFF_ROLES.contains(&role)
}
