use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::user::{NewUser as DomainNewUser, UpdateUser as DomainUpdateUser, User as DomainUser},
    models::user::{NewUser as DbNewUser, UpdateUser as DbUpdateUser, User as DbUser},
    repository::{DieselRepository, RepositoryError, RepositoryResult, UserReader, UserWriter},
};

impl UserReader for DieselRepository {
    fn get_user_by_username(&self, username: &str) -> RepositoryResult<Option<DomainUser>> {
        let mut conn = self.conn()?;
        let user = find_user(&mut conn, username)?;

        Ok(user.map(Into::into))
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &DomainNewUser) -> RepositoryResult<DomainUser> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        // The write lock is taken up front so the existence check and the
        // insert cannot interleave with a concurrent registration.
        conn.immediate_transaction::<DomainUser, RepositoryError, _>(|conn| {
            if find_user(conn, &new_user.username)?.is_some() {
                return Err(RepositoryError::Conflict(format!(
                    "username `{}` is taken",
                    new_user.username
                )));
            }

            let db_new = DbNewUser::from(new_user);
            let created = diesel::insert_into(users::table)
                .values(&db_new)
                .get_result::<DbUser>(conn)?;

            Ok(created.into())
        })
    }

    fn update_user(
        &self,
        username: &str,
        updates: &DomainUpdateUser,
    ) -> RepositoryResult<DomainUser> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<DomainUser, RepositoryError, _>(|conn| {
            let current = find_user(conn, username)?.ok_or(RepositoryError::NotFound)?;

            if let Some(new_name) = updates.username.as_deref() {
                if new_name != current.username && find_user(conn, new_name)?.is_some() {
                    return Err(RepositoryError::Conflict(format!(
                        "username `{new_name}` is taken"
                    )));
                }
            }

            let db_updates = DbUpdateUser::from(updates);
            let updated = diesel::update(users::table.filter(users::id.eq(current.id)))
                .set(&db_updates)
                .get_result::<DbUser>(conn)?;

            Ok(updated.into())
        })
    }
}

fn find_user(conn: &mut SqliteConnection, username: &str) -> RepositoryResult<Option<DbUser>> {
    use crate::schema::users;

    // SQLite's `=` on TEXT is case-sensitive under the default BINARY collation.
    let user = users::table
        .filter(users::username.eq(username))
        .first::<DbUser>(conn)
        .optional()?;

    Ok(user)
}
