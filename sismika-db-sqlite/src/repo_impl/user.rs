use super::*;

impl UserRepo for DbReadOnly<'_> {
    fn create_or_update_user(&self, _user: &User) -> Result<()> {
        unreachable!();
    }
    fn delete_user(&self, _subject: &SubjectId) -> Result<()> {
        unreachable!();
    }

    fn all_users(&self) -> Result<Vec<User>> {
        all_users(&mut self.conn.borrow_mut())
    }
    fn count_users(&self) -> Result<usize> {
        count_users(&mut self.conn.borrow_mut())
    }

    fn get_user(&self, subject: &SubjectId) -> Result<User> {
        get_user(&mut self.conn.borrow_mut(), subject)
    }
    fn try_get_user(&self, subject: &SubjectId) -> Result<Option<User>> {
        try_get_user(&mut self.conn.borrow_mut(), subject)
    }
}

impl UserRepo for DbReadWrite<'_> {
    fn create_or_update_user(&self, user: &User) -> Result<()> {
        create_or_update_user(&mut self.conn.borrow_mut(), user)
    }
    fn delete_user(&self, subject: &SubjectId) -> Result<()> {
        delete_user(&mut self.conn.borrow_mut(), subject)
    }

    fn all_users(&self) -> Result<Vec<User>> {
        all_users(&mut self.conn.borrow_mut())
    }
    fn count_users(&self) -> Result<usize> {
        count_users(&mut self.conn.borrow_mut())
    }

    fn get_user(&self, subject: &SubjectId) -> Result<User> {
        get_user(&mut self.conn.borrow_mut(), subject)
    }
    fn try_get_user(&self, subject: &SubjectId) -> Result<Option<User>> {
        try_get_user(&mut self.conn.borrow_mut(), subject)
    }
}

impl UserRepo for DbConnection<'_> {
    fn create_or_update_user(&self, user: &User) -> Result<()> {
        create_or_update_user(&mut self.conn.borrow_mut(), user)
    }
    fn delete_user(&self, subject: &SubjectId) -> Result<()> {
        delete_user(&mut self.conn.borrow_mut(), subject)
    }

    fn all_users(&self) -> Result<Vec<User>> {
        all_users(&mut self.conn.borrow_mut())
    }
    fn count_users(&self) -> Result<usize> {
        count_users(&mut self.conn.borrow_mut())
    }

    fn get_user(&self, subject: &SubjectId) -> Result<User> {
        get_user(&mut self.conn.borrow_mut(), subject)
    }
    fn try_get_user(&self, subject: &SubjectId) -> Result<Option<User>> {
        try_get_user(&mut self.conn.borrow_mut(), subject)
    }
}

fn create_or_update_user(conn: &mut SqliteConnection, u: &User) -> Result<()> {
    let new_user = models::NewUser::from(u);
    diesel::replace_into(schema::users::table)
        .values(&new_user)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn delete_user(conn: &mut SqliteConnection, subject: &SubjectId) -> Result<()> {
    use schema::users::dsl;
    let count = diesel::delete(dsl::users.filter(dsl::subject.eq(subject.as_str())))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn get_user(conn: &mut SqliteConnection, subject: &SubjectId) -> Result<User> {
    use schema::users::dsl;
    let entity = dsl::users
        .filter(dsl::subject.eq(subject.as_str()))
        .first::<models::UserEntity>(conn)
        .map_err(from_diesel_err)?;
    load_user(entity)
}

fn try_get_user(conn: &mut SqliteConnection, subject: &SubjectId) -> Result<Option<User>> {
    use schema::users::dsl;
    dsl::users
        .filter(dsl::subject.eq(subject.as_str()))
        .first::<models::UserEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(load_user)
        .transpose()
}

fn all_users(conn: &mut SqliteConnection) -> Result<Vec<User>> {
    use schema::users::dsl;
    dsl::users
        .order_by(dsl::subject.asc())
        .load::<models::UserEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_user)
        .collect()
}

fn count_users(conn: &mut SqliteConnection) -> Result<usize> {
    use schema::users::dsl;
    Ok(dsl::users
        .select(diesel::dsl::count(dsl::subject))
        .first::<i64>(conn)
        .map_err(from_diesel_err)? as usize)
}
