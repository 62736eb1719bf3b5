//! 联系留言存储操作

use super::SeaOrmStorage;
use crate::entity::contact_messages::{ActiveModel, Column, Entity as ContactMessages};
use crate::errors::{DominiqueError, Result};
use crate::models::contact::{
    entities::{ContactMessage, ContactStatus},
    requests::NewContactMessage,
};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, QuerySelect, Set};

impl SeaOrmStorage {
    /// 创建留言
    pub async fn create_contact_message_impl(
        &self,
        message: NewContactMessage,
    ) -> Result<ContactMessage> {
        let now = chrono::Utc::now().timestamp_millis();

        let model = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(message.name),
            email: Set(message.email),
            phone: Set(message.phone),
            message: Set(message.message),
            status: Set(ContactStatus::New.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DominiqueError::database_operation(format!("创建留言失败: {e}")))?;

        Ok(result.into_contact_message())
    }

    /// 通过 ID 获取留言
    pub async fn get_contact_message_by_id_impl(&self, id: &str) -> Result<Option<ContactMessage>> {
        let result = ContactMessages::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| DominiqueError::database_operation(format!("查询留言失败: {e}")))?;

        Ok(result.map(|m| m.into_contact_message()))
    }

    /// 列出最新的留言
    pub async fn list_contact_messages_impl(&self, limit: u64) -> Result<Vec<ContactMessage>> {
        let messages = ContactMessages::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| DominiqueError::database_operation(format!("查询留言列表失败: {e}")))?;

        Ok(messages.into_iter().map(|m| m.into_contact_message()).collect())
    }

    /// 更新留言状态
    pub async fn update_contact_message_status_impl(
        &self,
        id: &str,
        status: ContactStatus,
    ) -> Result<Option<ContactMessage>> {
        let existing = ContactMessages::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| DominiqueError::database_operation(format!("查询留言失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.status = Set(status.to_string());
        model.updated_at = Set(chrono::Utc::now().timestamp_millis());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| DominiqueError::database_operation(format!("更新留言状态失败: {e}")))?;

        Ok(Some(updated.into_contact_message()))
    }

    /// 删除留言
    pub async fn delete_contact_message_impl(&self, id: &str) -> Result<bool> {
        let result = ContactMessages::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| DominiqueError::database_operation(format!("删除留言失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_message(name: &str) -> NewContactMessage {
        NewContactMessage {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "(11) 99999-0000".to_string(),
            message: "Gostaria de informações sobre matrículas.".to_string(),
        }
    }

    #[actix_web::test]
    async fn test_create_starts_as_new() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let created = storage
            .create_contact_message_impl(new_message("Maria"))
            .await
            .unwrap();
        assert_eq!(created.status, ContactStatus::New);
        assert_eq!(created.created_at, created.updated_at);

        let fetched = storage
            .get_contact_message_by_id_impl(&created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.email, "maria@example.com");
    }

    #[actix_web::test]
    async fn test_list_newest_first_with_limit() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        for name in ["Primeiro", "Segundo", "Terceiro"] {
            storage
                .create_contact_message_impl(new_message(name))
                .await
                .unwrap();
            std::thread::sleep(std::time::Duration::from_millis(5));
        }

        let listed = storage.list_contact_messages_impl(2).await.unwrap();
        let names: Vec<_> = listed.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Terceiro", "Segundo"]);
    }

    #[actix_web::test]
    async fn test_update_status_accepts_any_value() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let created = storage
            .create_contact_message_impl(new_message("Joao"))
            .await
            .unwrap();

        let replied = storage
            .update_contact_message_status_impl(&created.id, ContactStatus::Replied)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(replied.status, ContactStatus::Replied);

        let reverted = storage
            .update_contact_message_status_impl(&created.id, ContactStatus::New)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reverted.status, ContactStatus::New);
    }

    #[actix_web::test]
    async fn test_update_and_delete_unknown_id() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        assert!(
            storage
                .update_contact_message_status_impl("missing", ContactStatus::Read)
                .await
                .unwrap()
                .is_none()
        );
        assert!(!storage.delete_contact_message_impl("missing").await.unwrap());
    }

    #[actix_web::test]
    async fn test_delete_removes_message() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let created = storage
            .create_contact_message_impl(new_message("Ana"))
            .await
            .unwrap();
        assert!(storage.delete_contact_message_impl(&created.id).await.unwrap());
        assert!(
            storage
                .get_contact_message_by_id_impl(&created.id)
                .await
                .unwrap()
                .is_none()
        );
    }
}
