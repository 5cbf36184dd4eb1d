//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::users::{
    data::{IdentityProfile, NewUser, UserProfileUpdate},
    records::{UserRecord, UserUuid},
};

const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const FIND_USER_BY_SUBJECT_SQL: &str = include_str!("sql/find_user_by_subject.sql");
const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const UPDATE_USER_IDENTITY_SQL: &str = include_str!("sql/update_user_identity.sql");
const UPDATE_USER_PROFILE_SQL: &str = include_str!("sql/update_user_profile.sql");
const SET_USER_ADMIN_SQL: &str = include_str!("sql/set_user_admin.sql");
const DELETE_USER_BY_SUBJECT_SQL: &str = include_str!("sql/delete_user_by_subject.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_user_by_subject(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subject: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(FIND_USER_BY_SUBJECT_SQL)
            .bind(subject)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        new: &NewUser,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(user.into_uuid())
            .bind(&new.subject)
            .bind(&new.name)
            .bind(&new.email)
            .bind(&new.username)
            .bind(new.avatar_url.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_user_identity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: &IdentityProfile,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(UPDATE_USER_IDENTITY_SQL)
            .bind(&profile.subject)
            .bind(&profile.name)
            .bind(profile.email.as_deref())
            .bind(profile.username.as_deref())
            .bind(profile.avatar_url.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_user_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        update: &UserProfileUpdate,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(UPDATE_USER_PROFILE_SQL)
            .bind(user.into_uuid())
            .bind(update.name.as_deref())
            .bind(update.address.as_deref())
            .bind(update.phone.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_user_admin(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subject: &str,
        is_admin: bool,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(SET_USER_ADMIN_SQL)
            .bind(subject)
            .bind(is_admin)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_user_by_subject(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subject: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_USER_BY_SUBJECT_SQL)
            .bind(subject)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            subject: row.try_get("subject")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            username: row.try_get("username")?,
            avatar_url: row.try_get("avatar_url")?,
            address: row.try_get("address")?,
            phone: row.try_get("phone")?,
            is_admin: row.try_get("is_admin")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
