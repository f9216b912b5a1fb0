//! Operator notifications.
//!
//! The client does not talk to any messenger itself. A [`Notifier`] is injected
//! through [`ClientBuilder::notifier`](crate::ClientBuilder::notifier) and
//! receives ready-made HTML texts.

use async_trait::async_trait;

use crate::{
    account::Account,
    action::Action,
    api::InstaproApi,
    error::Error,
    result::Result,
    user::User,
};

/// Delivers a text to a chat.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends `text` to `chat_id`.
    ///
    /// # Errors
    ///
    /// Implementations should report delivery failures as [`Error::Notify`].
    async fn send(&self, chat_id: i64, text: &str) -> Result<()>;
}

pub(crate) fn error_text(account: &Account, action: &Action) -> String {
    format!(
        "<b>Ошибка</b>\n\
         <b>Аккаунт: </b><code>{}</code>\n\
         <b>Действие: </b><code>{}</code>\n\
         <b>Текущий статус: </b><code>{}</code>",
        account.login(),
        action.action_type().title(),
        action.status().title(),
    )
}

pub(crate) fn code_request_text(action_id: &str) -> String {
    format!("<b>Введите код из письма</b>\n#Service info\nAction ID: {action_id}")
}

impl InstaproApi {
    /// Tells the owner of the action's account that the action failed.
    ///
    /// # Errors
    ///
    /// Fails if no notifier is configured, if the action, its account or the
    /// owner cannot be fetched, or if delivery fails.
    pub async fn send_error(&self, action_id: &str) -> Result<()> {
        let notifier = self.notifier().ok_or(Error::NoNotifier)?;
        let (action, account, user) = self.action_owner(action_id).await?;
        notifier
            .send(user.telegram_id(), &error_text(&account, &action))
            .await
    }

    /// Asks the owner of the action's account for the code from the login e-mail.
    ///
    /// # Errors
    ///
    /// Fails if no notifier is configured, if the action, its account or the
    /// owner cannot be fetched, or if delivery fails.
    pub async fn send_code_request(&self, action_id: &str) -> Result<()> {
        let notifier = self.notifier().ok_or(Error::NoNotifier)?;
        let (_, _, user) = self.action_owner(action_id).await?;
        notifier
            .send(user.telegram_id(), &code_request_text(action_id))
            .await
    }

    async fn action_owner(&self, action_id: &str) -> Result<(Action, Account, User)> {
        let action = self.get_action(action_id).await?;
        let account = self
            .get_account(action.account_id())
            .await?
            .ok_or_else(|| Error::NotFound {
                kind: "account",
                id: action.account_id().to_string(),
            })?;
        let user = self.get_user(account.user_id()).await?;
        Ok((action, account, user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_text_uses_titles() {
        let account: Account = serde_json::from_str(
            r#"{"id":"a1","login":"nasa","sub_server_id":"s1","user_id":"u1"}"#,
        )
        .unwrap();
        let action: Action = serde_json::from_str(
            r#"{"id":"x1","action_type":"WATCH_STORIES","status":"FAILED","account_id":"a1","update_id":"1"}"#,
        )
        .unwrap();
        assert_eq!(
            error_text(&account, &action),
            "<b>Ошибка</b>\n\
             <b>Аккаунт: </b><code>nasa</code>\n\
             <b>Действие: </b><code>Просмотр историй</code>\n\
             <b>Текущий статус: </b><code>Провалено</code>"
        );
    }

    #[test]
    fn code_request_mentions_action() {
        assert!(code_request_text("x42").ends_with("Action ID: x42"));
    }
}
