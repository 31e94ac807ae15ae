use crate::models::user::User;
use crate::utils::time::to_iso8601;

pub const CSV_CONTENT_TYPE: &str = "text/csv";
pub const CSV_FILENAME: &str = "users.csv";

const HEADERS: [&str; 10] = [
    "First Name",
    "Last Name",
    "Email",
    "Mobile",
    "Gender",
    "Status",
    "Location",
    "Profile",
    "Created At",
    "Updated At",
];

pub struct ExportService;

impl ExportService {
    /// Quotes a field when it contains a comma, a double quote or a newline,
    /// doubling any embedded quotes.
    pub fn escape_field(field: &str) -> String {
        if field.contains([',', '"', '\n', '\r']) {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn row(fields: &[&str]) -> String {
        fields
            .iter()
            .map(|f| Self::escape_field(f))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Renders the given users, in order, as CSV text with a header row.
    pub fn generate_users_csv(users: &[User]) -> String {
        let mut lines = Vec::with_capacity(users.len() + 1);
        lines.push(HEADERS.join(","));

        for user in users {
            let created_at = to_iso8601(user.created_at);
            let updated_at = to_iso8601(user.updated_at);
            lines.push(Self::row(&[
                user.first_name.as_str(),
                user.last_name.as_str(),
                user.email.as_str(),
                user.mobile.as_str(),
                user.gender.as_str(),
                user.status.as_str(),
                user.location.as_str(),
                user.profile.as_str(),
                created_at.as_str(),
                updated_at.as_str(),
            ]));
        }

        lines.join("\n")
    }
}
