use super::*;

impl SessionRepo for DbReadOnly<'_> {
    fn create_pending_session(&self, _pending: &PendingSession) -> Result<()> {
        unreachable!();
    }
    fn take_pending_session(&self, _id: &str) -> Result<PendingSession> {
        unreachable!();
    }
    fn upgrade_session(&self, _session: &Session) -> Result<()> {
        unreachable!();
    }
    fn delete_session(&self, _id: &str) -> Result<()> {
        unreachable!();
    }
    fn delete_expired_sessions(&self, _expired_before: Timestamp) -> Result<usize> {
        unreachable!();
    }

    fn get_session(&self, id: &str) -> Result<Session> {
        get_session(&mut self.conn.borrow_mut(), id)
    }
}

impl SessionRepo for DbReadWrite<'_> {
    fn create_pending_session(&self, pending: &PendingSession) -> Result<()> {
        create_pending_session(&mut self.conn.borrow_mut(), pending)
    }
    fn take_pending_session(&self, id: &str) -> Result<PendingSession> {
        take_pending_session(&mut self.conn.borrow_mut(), id)
    }
    fn upgrade_session(&self, session: &Session) -> Result<()> {
        upgrade_session(&mut self.conn.borrow_mut(), session)
    }
    fn delete_session(&self, id: &str) -> Result<()> {
        delete_session(&mut self.conn.borrow_mut(), id)
    }
    fn delete_expired_sessions(&self, expired_before: Timestamp) -> Result<usize> {
        delete_expired_sessions(&mut self.conn.borrow_mut(), expired_before)
    }

    fn get_session(&self, id: &str) -> Result<Session> {
        get_session(&mut self.conn.borrow_mut(), id)
    }
}

impl SessionRepo for DbConnection<'_> {
    fn create_pending_session(&self, pending: &PendingSession) -> Result<()> {
        create_pending_session(&mut self.conn.borrow_mut(), pending)
    }
    fn take_pending_session(&self, id: &str) -> Result<PendingSession> {
        take_pending_session(&mut self.conn.borrow_mut(), id)
    }
    fn upgrade_session(&self, session: &Session) -> Result<()> {
        upgrade_session(&mut self.conn.borrow_mut(), session)
    }
    fn delete_session(&self, id: &str) -> Result<()> {
        delete_session(&mut self.conn.borrow_mut(), id)
    }
    fn delete_expired_sessions(&self, expired_before: Timestamp) -> Result<usize> {
        delete_expired_sessions(&mut self.conn.borrow_mut(), expired_before)
    }

    fn get_session(&self, id: &str) -> Result<Session> {
        get_session(&mut self.conn.borrow_mut(), id)
    }
}

fn create_pending_session(conn: &mut SqliteConnection, pending: &PendingSession) -> Result<()> {
    let model = models::NewPendingSession::from(pending);
    diesel::insert_into(schema::pending_sessions::table)
        .values(&model)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn take_pending_session(conn: &mut SqliteConnection, id: &str) -> Result<PendingSession> {
    use schema::pending_sessions::dsl;
    let entity = dsl::pending_sessions
        .filter(dsl::id.eq(id))
        .first::<models::PendingSessionEntity>(conn)
        .map_err(from_diesel_err)?;
    if diesel::delete(dsl::pending_sessions.filter(dsl::id.eq(id)))
        .execute(conn)
        .map_err(from_diesel_err)?
        == 0
    {
        return Err(repo::Error::NotFound);
    }
    load_pending_session(entity)
}

fn upgrade_session(conn: &mut SqliteConnection, session: &Session) -> Result<()> {
    use schema::pending_sessions::dsl;
    // Stray pending records under the same id must not outlive the
    // confirmed session.
    diesel::delete(dsl::pending_sessions.filter(dsl::id.eq(session.id.as_str())))
        .execute(conn)
        .map_err(from_diesel_err)?;
    let model = models::NewSession::from(session);
    diesel::replace_into(schema::sessions::table)
        .values(&model)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_session(conn: &mut SqliteConnection, id: &str) -> Result<Session> {
    use schema::sessions::dsl;
    Ok(dsl::sessions
        .filter(dsl::id.eq(id))
        .first::<models::SessionEntity>(conn)
        .map_err(from_diesel_err)?
        .into())
}

fn delete_session(conn: &mut SqliteConnection, id: &str) -> Result<()> {
    use schema::sessions::dsl;
    let count = diesel::delete(dsl::sessions.filter(dsl::id.eq(id)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn delete_expired_sessions(conn: &mut SqliteConnection, expired_before: Timestamp) -> Result<usize> {
    use schema::{pending_sessions::dsl as p_dsl, sessions::dsl as s_dsl};
    let deadline = expired_before.as_secs();
    let pending = diesel::delete(p_dsl::pending_sessions.filter(p_dsl::expires_at.lt(deadline)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    let confirmed = diesel::delete(s_dsl::sessions.filter(s_dsl::expires_at.lt(deadline)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(pending + confirmed)
}
