#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { field: String, value: String }, // /set <field> <value>
    Form,                                 // /form
    Submit,                               // /submit
    Keywords(bool),                       // /keywords on|off
    Approve,                              // /approve
    Edit,                                 // /edit or /reject
    Cancel,                               // /cancel
    Rate {
        rating: String,
        email: String,
        comment: Option<String>,
    }, // /rate <1-5> <email> [comment]
    Help,                                 // /help
    Quit,                                 // /quit or /exit
    Usage(&'static str),
    Unknown(String),
}

pub fn parse_command(input: &str) -> Command {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return Command::Unknown(trimmed.to_string());
    }
    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let verb = parts.next().unwrap_or_default();
    let rest = parts.next().map(str::trim).filter(|s| !s.is_empty());

    match verb {
        "/set" => {
            let Some(rest) = rest else {
                return Command::Usage("/set <field> <value>");
            };
            let mut kv = rest.splitn(2, char::is_whitespace);
            let field = kv.next().unwrap_or_default().to_string();
            let value = kv.next().map(str::trim).unwrap_or_default().to_string();
            Command::Set { field, value }
        }
        "/form" => Command::Form,
        "/submit" => Command::Submit,
        "/keywords" => match rest.map(str::to_ascii_lowercase).as_deref() {
            Some("on") | Some("yes") | Some("true") => Command::Keywords(true),
            Some("off") | Some("no") | Some("false") => Command::Keywords(false),
            _ => Command::Usage("/keywords on|off"),
        },
        "/approve" => Command::Approve,
        "/edit" | "/reject" => Command::Edit,
        "/cancel" => Command::Cancel,
        "/rate" => {
            let Some(rest) = rest else {
                return Command::Usage("/rate <1-5> <email> [comment]");
            };
            let mut args = rest.splitn(3, char::is_whitespace);
            let rating = args.next().unwrap_or_default().to_string();
            let Some(email) = args.next() else {
                return Command::Usage("/rate <1-5> <email> [comment]");
            };
            let comment = args
                .next()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string);
            Command::Rate {
                rating,
                email: email.to_string(),
                comment,
            }
        }
        "/help" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_keeps_spaces_in_value() {
        assert_eq!(
            parse_command("/set instructions  Focus on  teams "),
            Command::Set {
                field: "instructions".into(),
                value: "Focus on  teams".into()
            }
        );
        assert_eq!(
            parse_command("/set app_id"),
            Command::Set {
                field: "app_id".into(),
                value: String::new()
            }
        );
        assert_eq!(parse_command("/set"), Command::Usage("/set <field> <value>"));
    }

    #[test]
    fn reject_is_an_alias_for_edit() {
        assert_eq!(parse_command("/reject"), Command::Edit);
        assert_eq!(parse_command("/edit"), Command::Edit);
    }

    #[test]
    fn keywords_toggle() {
        assert_eq!(parse_command("/keywords ON"), Command::Keywords(true));
        assert_eq!(parse_command("/keywords off"), Command::Keywords(false));
        assert!(matches!(parse_command("/keywords"), Command::Usage(_)));
    }

    #[test]
    fn rate_splits_comment() {
        assert_eq!(
            parse_command("/rate 4 ana@example.com great tool, thanks"),
            Command::Rate {
                rating: "4".into(),
                email: "ana@example.com".into(),
                comment: Some("great tool, thanks".into()),
            }
        );
        assert!(matches!(parse_command("/rate 4"), Command::Usage(_)));
    }

    #[test]
    fn unknown_verbs_pass_through() {
        assert_eq!(parse_command("/nope x"), Command::Unknown("/nope x".into()));
        assert_eq!(parse_command("/exit"), Command::Quit);
    }
}
