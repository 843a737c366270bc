use crate::error::GuardianError;
use guardian_reminders_api_structs::ReminderRequestBody;
use guardian_reminders_domain::{
    date::{format_millis, parse_datetime_millis},
    InvalidOffsetError, ReminderConfiguration, ReminderOffset, ReminderSettings, ID,
};
use guardian_reminders_infra::GuardianContext;

/// Ways the content of a create or edit request can be invalid, in the order
/// they are checked
#[derive(Debug, PartialEq)]
pub enum ReminderInputError {
    MissingContent,
    InvalidDateTime(String),
    EventInPast(String),
    InvalidOffset(InvalidOffsetError),
    NoChannelEnabled,
}

impl From<ReminderInputError> for GuardianError {
    fn from(e: ReminderInputError) -> Self {
        match e {
            ReminderInputError::MissingContent => Self::MissingReminderContent,
            ReminderInputError::InvalidDateTime(datetime) => Self::InvalidEventDateTime(datetime),
            ReminderInputError::EventInPast(datetime) => Self::EventInPast(datetime),
            ReminderInputError::InvalidOffset(e) => Self::InvalidReminderChannels(e.to_string()),
            ReminderInputError::NoChannelEnabled => Self::InvalidReminderChannels(
                "At least one of the event, days, hours or minutes reminders must be enabled"
                    .into(),
            ),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_ref()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Validates the request body of a create or edit and turns it into
/// `ReminderSettings`. The first failing check wins.
pub fn parse_reminder_settings(
    input: &ReminderRequestBody,
    now: i64,
) -> Result<ReminderSettings, ReminderInputError> {
    let (title, text) = match (non_blank(&input.title), non_blank(&input.text)) {
        (Some(title), Some(text)) => (title, text),
        _ => return Err(ReminderInputError::MissingContent),
    };

    let datetime = input.event_datetime.clone().unwrap_or_default();
    let event_ts = parse_datetime_millis(&datetime)
        .map_err(|_| ReminderInputError::InvalidDateTime(datetime.clone()))?;
    if event_ts < now {
        return Err(ReminderInputError::EventInPast(format_millis(event_ts)));
    }

    let settings = ReminderSettings {
        title,
        text,
        event_ts,
        reminder_days: ReminderOffset::from_option(input.reminder_days)
            .map_err(ReminderInputError::InvalidOffset)?,
        reminder_hours: ReminderOffset::from_option(input.reminder_hours)
            .map_err(ReminderInputError::InvalidOffset)?,
        reminder_minutes: ReminderOffset::from_option(input.reminder_minutes)
            .map_err(ReminderInputError::InvalidOffset)?,
        send_event_reminder: input.send_event_reminder,
    };
    if !settings.has_enabled_channel() {
        return Err(ReminderInputError::NoChannelEnabled);
    }

    Ok(settings)
}

#[derive(Debug, PartialEq)]
pub enum ReminderLookupError {
    NotFound(ID),
    OtherUser(ID),
}

impl From<ReminderLookupError> for GuardianError {
    fn from(e: ReminderLookupError) -> Self {
        match e {
            ReminderLookupError::NotFound(id) => Self::ReminderNotFound(id),
            ReminderLookupError::OtherUser(id) => Self::ReminderNotOwned(id),
        }
    }
}

/// Finds an undeleted `ReminderConfiguration` owned by the `User`
pub async fn find_user_reminder(
    user_id: &ID,
    reminder_id: &ID,
    ctx: &GuardianContext,
) -> Result<ReminderConfiguration, ReminderLookupError> {
    match ctx.repos.reminder_configurations.find(reminder_id).await {
        Some(reminder) if reminder.is_deleted => {
            Err(ReminderLookupError::NotFound(reminder_id.clone()))
        }
        Some(reminder) if reminder.user_id != *user_id => {
            Err(ReminderLookupError::OtherUser(reminder_id.clone()))
        }
        Some(reminder) => Ok(reminder),
        None => Err(ReminderLookupError::NotFound(reminder_id.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: &str = "2024-01-09 12:00:00";

    fn now() -> i64 {
        parse_datetime_millis(NOW).unwrap()
    }

    fn valid_input() -> ReminderRequestBody {
        ReminderRequestBody {
            title: Some("Court date".into()),
            text: Some("Appear at the county court".into()),
            event_datetime: Some("2024-01-10 09:00:00".into()),
            reminder_days: Some(1),
            reminder_hours: None,
            reminder_minutes: None,
            send_event_reminder: false,
        }
    }

    #[test]
    fn accepts_valid_input() {
        let settings = parse_reminder_settings(&valid_input(), now()).unwrap();
        assert_eq!(settings.title, "Court date");
        assert_eq!(settings.reminder_days, ReminderOffset::Before(1));
        assert_eq!(settings.reminder_hours, ReminderOffset::Absent);
        assert_eq!(
            settings.event_ts,
            parse_datetime_millis("2024-01-10 09:00:00").unwrap()
        );
    }

    #[test]
    fn rejects_blank_content() {
        let mut input = valid_input();
        input.title = Some("   ".into());
        assert_eq!(
            parse_reminder_settings(&input, now()),
            Err(ReminderInputError::MissingContent)
        );

        let mut input = valid_input();
        input.text = None;
        assert_eq!(
            parse_reminder_settings(&input, now()),
            Err(ReminderInputError::MissingContent)
        );
    }

    #[test]
    fn rejects_bad_datetimes() {
        let mut input = valid_input();
        input.event_datetime = Some("next tuesday".into());
        assert_eq!(
            parse_reminder_settings(&input, now()),
            Err(ReminderInputError::InvalidDateTime("next tuesday".into()))
        );

        input.event_datetime = None;
        assert!(matches!(
            parse_reminder_settings(&input, now()),
            Err(ReminderInputError::InvalidDateTime(_))
        ));

        input.event_datetime = Some("2024-01-08 09:00:00".into());
        assert!(matches!(
            parse_reminder_settings(&input, now()),
            Err(ReminderInputError::EventInPast(_))
        ));
    }

    #[test]
    fn requires_an_enabled_channel() {
        let mut input = valid_input();
        input.reminder_days = None;
        assert_eq!(
            parse_reminder_settings(&input, now()),
            Err(ReminderInputError::NoChannelEnabled)
        );

        // Zero is a present offset
        input.reminder_minutes = Some(0);
        let settings = parse_reminder_settings(&input, now()).unwrap();
        assert_eq!(settings.reminder_minutes, ReminderOffset::Zero);

        input.reminder_hours = Some(-2);
        assert_eq!(
            parse_reminder_settings(&input, now()),
            Err(ReminderInputError::InvalidOffset(
                InvalidOffsetError::Negative(-2)
            ))
        );
    }

    #[test]
    fn first_failure_wins() {
        let input = ReminderRequestBody {
            title: None,
            event_datetime: Some("garbage".into()),
            ..Default::default()
        };
        assert_eq!(
            parse_reminder_settings(&input, now()),
            Err(ReminderInputError::MissingContent)
        );
    }
}
