//! Small form checks shared by the dialogs. Each returns the message to
//! show under the form when the rule fails.

pub fn required(value: &str, label: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{label} is required"))
    } else {
        Ok(())
    }
}

pub fn email(value: &str) -> Result<(), String> {
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.split_once('.').is_some_and(|(host, tld)| {
                    !host.is_empty() && !tld.is_empty()
                })
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err("The format is not a valid email".to_string())
    }
}

/// Role names are uppercase identifiers, e.g. ADMIN_ROLE.
pub fn role_name(value: &str) -> Result<(), String> {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_uppercase() || c == '_') {
        Ok(())
    } else {
        Err("Role names use capital letters and underscores only".to_string())
    }
}

pub fn numeric(value: &str, label: &str) -> Result<(), String> {
    if value.trim().parse::<f64>().is_ok() {
        Ok(())
    } else {
        Err(format!("{label} must be a number"))
    }
}

pub fn confirm(password: &str, confirmation: &str) -> Result<(), String> {
    if password == confirmation {
        Ok(())
    } else {
        Err("Passwords do not match".to_string())
    }
}

/// FK selects keep 0 as their "nothing chosen" value.
pub fn selected(id: i64, label: &str) -> Result<(), String> {
    if id > 0 {
        Ok(())
    } else {
        Err(format!("Select a {label}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn required_rejects_blank_and_whitespace() {
        assert!(required("concrete", "Name").is_ok());
        assert_eq!(required("", "Name").unwrap_err(), "Name is required");
        assert!(required("   ", "Name").is_err());
    }

    #[rstest]
    #[case("ana@example.com", true)]
    #[case("a@b.co", true)]
    #[case("no-at-sign", false)]
    #[case("@example.com", false)]
    #[case("ana@nodot", false)]
    #[case("ana@.com", false)]
    #[case("ana@example.", false)]
    fn email_checks_the_basic_shape(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(email(value).is_ok(), ok);
    }

    #[rstest]
    #[case("ADMIN_ROLE", true)]
    #[case("SUPERVISOR", true)]
    #[case("admin", false)]
    #[case("ADMIN ROLE", false)]
    #[case("", false)]
    fn role_names_are_uppercase_identifiers(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(role_name(value).is_ok(), ok);
    }

    #[test]
    fn numeric_accepts_decimals() {
        assert!(numeric("96.50", "Base price").is_ok());
        assert!(numeric(" 3 ", "Base price").is_ok());
        assert!(numeric("abc", "Base price").is_err());
    }

    #[test]
    fn confirm_requires_matching_passwords() {
        assert!(confirm("secret", "secret").is_ok());
        assert!(confirm("secret", "Secret").is_err());
    }

    #[test]
    fn selected_treats_zero_as_unset() {
        assert!(selected(3, "project").is_ok());
        assert_eq!(selected(0, "project").unwrap_err(), "Select a project");
    }
}
