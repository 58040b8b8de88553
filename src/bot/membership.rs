use async_trait::async_trait;
use teloxide::{
    prelude::*,
    types::{ChatId, ChatMemberKind, UserId},
    Bot, RequestError,
};

// Status of a user inside the gate channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberStatus {
    Owner,
    Administrator,
    Member,
    Restricted,
    Left,
    Banned,
}

impl MemberStatus {
    pub fn grants_access(self) -> bool {
        matches!(
            self,
            MemberStatus::Owner | MemberStatus::Administrator | MemberStatus::Member
        )
    }
}

impl From<&ChatMemberKind> for MemberStatus {
    fn from(kind: &ChatMemberKind) -> MemberStatus {
        match kind {
            ChatMemberKind::Owner(_) => MemberStatus::Owner,
            ChatMemberKind::Administrator(_) => MemberStatus::Administrator,
            ChatMemberKind::Member => MemberStatus::Member,
            ChatMemberKind::Restricted(_) => MemberStatus::Restricted,
            ChatMemberKind::Left => MemberStatus::Left,
            ChatMemberKind::Banned(_) => MemberStatus::Banned,
        }
    }
}

#[async_trait]
pub trait MemberStatusSource: Send + Sync {
    async fn member_status(
        &self,
        chat_id: ChatId,
        user_id: UserId,
    ) -> Result<MemberStatus, RequestError>;
}

#[async_trait]
impl MemberStatusSource for Bot {
    async fn member_status(
        &self,
        chat_id: ChatId,
        user_id: UserId,
    ) -> Result<MemberStatus, RequestError> {
        let member = self.get_chat_member(chat_id, user_id).await?;
        Ok(MemberStatus::from(&member.kind))
    }
}

/* Membership gate.
 * Fails closed: if the status lookup fails for any reason, the user is treated as a non-member.
 */
pub async fn is_member<S: MemberStatusSource + ?Sized>(
    source: &S,
    channel_id: ChatId,
    user_id: UserId,
) -> bool {
    match source.member_status(channel_id, user_id).await {
        Ok(status) => status.grants_access(),
        Err(err) => {
            log::error!("Error checking membership for user {}: {}", user_id, err);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::ApiError;

    struct FixedStatus(Result<MemberStatus, String>);

    #[async_trait]
    impl MemberStatusSource for FixedStatus {
        async fn member_status(
            &self,
            _chat_id: ChatId,
            _user_id: UserId,
        ) -> Result<MemberStatus, RequestError> {
            match &self.0 {
                Ok(status) => Ok(*status),
                Err(message) => Err(RequestError::Api(ApiError::Unknown(message.clone()))),
            }
        }
    }

    const CHANNEL: ChatId = ChatId(-1002460204159);

    #[tokio::test]
    async fn test_member_statuses() {
        let expected = [
            (MemberStatus::Owner, true),
            (MemberStatus::Administrator, true),
            (MemberStatus::Member, true),
            (MemberStatus::Restricted, false),
            (MemberStatus::Left, false),
            (MemberStatus::Banned, false),
        ];

        for (status, allowed) in expected {
            let source = FixedStatus(Ok(status));
            assert_eq!(is_member(&source, CHANNEL, UserId(42)).await, allowed);
        }
    }

    #[tokio::test]
    async fn test_lookup_failure_denies_access() {
        let source = FixedStatus(Err("Bad Request: member list is inaccessible".to_string()));
        for user in [UserId(1), UserId(42), UserId(u64::MAX)] {
            assert!(!is_member(&source, CHANNEL, user).await);
        }
    }
}
