use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};

use crate::{
    EngineError, ResultEngine, SettingsUpdate, UserIdentity, currencies, user_settings, users,
};

use super::{Engine, normalize_optional_text, patch, touch, with_tx};

const DEFAULT_TIMEZONE: &str = "UTC";
const DEFAULT_LANGUAGE: &str = "en";
const DEFAULT_DATE_FORMAT: &str = "YYYY-MM-DD";
const DEFAULT_THEME: &str = "light";

fn normalize_email(email: &str) -> ResultEngine<String> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(EngineError::InvalidInput("a valid email is required".to_string()));
    }
    Ok(email)
}

impl Engine {
    /// Map an identity-provider subject to the local user row.
    ///
    /// Lookup order: `external_id`, then email (linking the row to the
    /// subject), else a new row is inserted.
    pub async fn resolve_user(&self, identity: UserIdentity) -> ResultEngine<users::Model> {
        let email = normalize_email(&identity.email)?;
        with_tx!(self, |db_tx| self.resolve_user_in(&db_tx, identity, email).await)
    }

    async fn resolve_user_in<C: ConnectionTrait>(
        &self,
        db: &C,
        identity: UserIdentity,
        email: String,
    ) -> ResultEngine<users::Model> {
        if let Some(user) = users::Entity::find()
            .filter(users::Column::ExternalId.eq(identity.external_id.as_str()))
            .one(db)
            .await?
        {
            if identity.email_verified && !user.email_verified {
                let mut active: users::ActiveModel = user.into();
                active.email_verified = ActiveValue::Set(true);
                active.last_modified_at = ActiveValue::Set(Utc::now());
                return Ok(active.update(db).await?);
            }
            return Ok(user);
        }

        if let Some(user) = users::Entity::find()
            .filter(users::Column::Email.eq(email.as_str()))
            .one(db)
            .await?
        {
            let verified = user.email_verified || identity.email_verified;
            let mut active: users::ActiveModel = user.into();
            active.external_id = ActiveValue::Set(Some(identity.external_id));
            active.email_verified = ActiveValue::Set(verified);
            active.last_modified_at = ActiveValue::Set(Utc::now());
            return Ok(active.update(db).await?);
        }

        let now = Utc::now();
        let user = users::ActiveModel {
            email: ActiveValue::Set(email.clone()),
            first_name: ActiveValue::Set(normalize_optional_text(
                identity.first_name.as_deref(),
            )),
            last_name: ActiveValue::Set(normalize_optional_text(
                identity.last_name.as_deref(),
            )),
            email_verified: ActiveValue::Set(identity.email_verified),
            external_id: ActiveValue::Set(Some(identity.external_id)),
            created_at: ActiveValue::Set(now),
            last_modified_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(|err| EngineError::on_write(err, email))?;
        Ok(user)
    }

    pub async fn user(&self, user_id: i32) -> ResultEngine<users::Model> {
        with_tx!(self, |db_tx| self.find_user(&db_tx, user_id).await)
    }

    pub async fn user_by_email(&self, email: &str) -> ResultEngine<Option<users::Model>> {
        let email = email.trim().to_lowercase();
        with_tx!(self, |db_tx| {
            Ok(users::Entity::find()
                .filter(users::Column::Email.eq(email.as_str()))
                .one(&db_tx)
                .await?)
        })
    }

    /// Insert a user without an identity-provider subject. Used by the admin
    /// tooling.
    pub async fn create_user(
        &self,
        email: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> ResultEngine<users::Model> {
        let email = normalize_email(email)?;
        with_tx!(self, |db_tx| {
            let now = Utc::now();
            let user = users::ActiveModel {
                email: ActiveValue::Set(email.clone()),
                first_name: ActiveValue::Set(normalize_optional_text(first_name)),
                last_name: ActiveValue::Set(normalize_optional_text(last_name)),
                email_verified: ActiveValue::Set(false),
                created_at: ActiveValue::Set(now),
                last_modified_at: ActiveValue::Set(now),
                ..Default::default()
            }
            .insert(&db_tx)
            .await
            .map_err(|err| EngineError::on_write(err, email))?;
            Ok(user)
        })
    }

    pub async fn set_email_verified(&self, user_id: i32) -> ResultEngine<users::Model> {
        with_tx!(self, |db_tx| {
            let user = self.find_user(&db_tx, user_id).await?;
            let mut active: users::ActiveModel = user.into();
            active.email_verified = ActiveValue::Set(true);
            touch!(active, user_id);
            Ok(active.update(&db_tx).await?)
        })
    }

    pub async fn update_user_photo(
        &self,
        user_id: i32,
        photo_url: Option<String>,
    ) -> ResultEngine<users::Model> {
        with_tx!(self, |db_tx| {
            let user = self.find_user(&db_tx, user_id).await?;
            let mut active: users::ActiveModel = user.into();
            active.photo_url = ActiveValue::Set(normalize_optional_text(photo_url.as_deref()));
            touch!(active, user_id);
            Ok(active.update(&db_tx).await?)
        })
    }

    /// The caller's settings, created with defaults on first access.
    pub async fn user_settings(&self, user_id: i32) -> ResultEngine<user_settings::Model> {
        with_tx!(self, |db_tx| self.settings_or_default(&db_tx, user_id).await)
    }

    pub async fn update_user_settings(
        &self,
        user_id: i32,
        update: SettingsUpdate,
    ) -> ResultEngine<user_settings::Model> {
        with_tx!(self, |db_tx| {
            if let Some(Some(currency_id)) = update.default_currency_id
                && currencies::Entity::find_by_id(currency_id)
                    .one(&db_tx)
                    .await?
                    .is_none()
            {
                return Err(EngineError::InvalidId("Invalid currency ID".to_string()));
            }
            let settings = self.settings_or_default(&db_tx, user_id).await?;
            let mut active: user_settings::ActiveModel = settings.into();
            patch(&mut active.timezone, update.timezone);
            patch(&mut active.language, update.language);
            patch(&mut active.date_format, update.date_format);
            patch(&mut active.default_currency_id, update.default_currency_id);
            patch(&mut active.theme, update.theme);
            patch(&mut active.notification_enabled, update.notification_enabled);
            Ok(active.update(&db_tx).await?)
        })
    }

    async fn settings_or_default<C: ConnectionTrait>(
        &self,
        db: &C,
        user_id: i32,
    ) -> ResultEngine<user_settings::Model> {
        self.find_user(db, user_id).await?;
        if let Some(settings) = user_settings::Entity::find()
            .filter(user_settings::Column::UserId.eq(user_id))
            .one(db)
            .await?
        {
            return Ok(settings);
        }
        Ok(user_settings::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            timezone: ActiveValue::Set(DEFAULT_TIMEZONE.to_string()),
            language: ActiveValue::Set(DEFAULT_LANGUAGE.to_string()),
            date_format: ActiveValue::Set(DEFAULT_DATE_FORMAT.to_string()),
            default_currency_id: ActiveValue::Set(None),
            theme: ActiveValue::Set(DEFAULT_THEME.to_string()),
            notification_enabled: ActiveValue::Set(true),
            ..Default::default()
        }
        .insert(db)
        .await?)
    }
}
