//! Closed enums shared by the service schemas.
//!
//! Every variant carries its wire string and a localized title. Titles of typed
//! values are exhaustive. Looking a title up from a raw string is where the
//! enums differ: [`ActionStatus`] and [`ActionType`] reject unknown strings,
//! [`UsersType`] falls back to [`UsersType::PLACEHOLDER`].

use crate::{models::macros::titled_enum, result::Result};

titled_enum! {
    /// Lifecycle state of a queued [`Action`](crate::action::Action).
    ActionStatus, "action status" {
        /// Queued or running.
        Waiting => "WAITING", "Выполняется";
        /// Finished successfully.
        Completed => "COMPLETED", "Выполнено";
        /// Finished with an error.
        Failed => "FAILED", "Провалено";
        /// Suspended by the operator.
        Pause => "PAUSE", "На паузе";
    }
}

titled_enum! {
    /// Kind of automation work an action performs.
    ActionType, "action type" {
        /// Watch stories of a target audience.
        WatchStories => "WATCH_STORIES", "Просмотр историй";
        /// Log the account in.
        Login => "LOGIN", "Вход";
        /// Partial analysis of a target account.
        IncompleteAnalysis => "INCOMPLETE_ANALYSIS", "Неполный анализ";
        /// Full analysis of a target account.
        CompleteAnalysis => "COMPLETE_ANALYSIS", "Полный анализ";
        /// Unfollow previously followed users.
        Unfollowing => "UNFOLLOWING", "Отписка";
    }
}

titled_enum! {
    /// Audience filter used by analyses.
    UsersType, "users type" {
        /// Accounts from other countries.
        Foreign => "FOREIGN", "Иностранцы";
        /// Accounts that follow en masse.
        MassiveFollowers => "MASSIVE_FOLLOWS", "Массфоловеры";
    }
}

titled_enum! {
    /// Where a story-like run collects its audience from.
    UsersGetterType, "users getter type" {
        /// Followers of a user.
        Users => "USERS", "Пользователи";
        /// Posts tagged with a location.
        Locations => "LOCATIONS", "Локации";
        /// Posts tagged with a hashtag.
        HashTags => "HASH_TAGS", "Хэштеги";
    }
}

impl ActionStatus {
    /// Title for a raw wire string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownVariant`](crate::error::Error::UnknownVariant)
    /// if `raw` names no status.
    pub fn lookup_title(raw: &str) -> Result<&'static str> {
        Ok(raw.parse::<Self>()?.title())
    }
}

impl ActionType {
    /// Title for a raw wire string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownVariant`](crate::error::Error::UnknownVariant)
    /// if `raw` names no action type.
    pub fn lookup_title(raw: &str) -> Result<&'static str> {
        Ok(raw.parse::<Self>()?.title())
    }
}

impl UsersType {
    /// Title shown when no filter is selected.
    pub const PLACEHOLDER: &'static str = "Не выбрано";

    /// Title for a raw wire string, or [`Self::PLACEHOLDER`] if it names no
    /// filter.
    pub fn lookup_title(raw: &str) -> &'static str {
        raw.parse::<Self>().map_or(Self::PLACEHOLDER, Self::title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn status_titles() {
        assert_eq!(ActionStatus::lookup_title("WAITING").unwrap(), "Выполняется");
        assert_eq!(ActionStatus::Pause.title(), "На паузе");
        assert!(matches!(
            ActionStatus::lookup_title("SLEEPING"),
            Err(Error::UnknownVariant { kind: "action status", .. })
        ));
    }

    #[test]
    fn every_action_type_has_a_title() {
        for ty in ActionType::ALL {
            assert!(!ty.title().is_empty());
            assert_eq!(ActionType::lookup_title(ty.as_str()).unwrap(), ty.title());
        }
        assert!(ActionType::lookup_title("watch_stories").is_err());
    }

    #[test]
    fn users_type_falls_back_to_placeholder() {
        assert_eq!(UsersType::lookup_title("FOREIGN"), "Иностранцы");
        assert_eq!(UsersType::lookup_title("MASSIVE_FOLLOWS"), "Массфоловеры");
        assert_eq!(UsersType::lookup_title("BOTS"), UsersType::PLACEHOLDER);
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&UsersType::MassiveFollowers).unwrap();
        assert_eq!(json, "\"MASSIVE_FOLLOWS\"");
        let ty: UsersGetterType = serde_json::from_str("\"HASH_TAGS\"").unwrap();
        assert_eq!(ty, UsersGetterType::HashTags);
        assert_eq!(ty.to_string(), "HASH_TAGS");
        assert!(serde_json::from_str::<ActionStatus>("\"DONE\"").is_err());
    }
}
