use super::*;

impl EvacCenterRepo for DbReadOnly<'_> {
    fn create_evac_center(&self, _center: &EvacCenter) -> Result<()> {
        unreachable!();
    }
    fn delete_evac_center(&self, _id: &str) -> Result<()> {
        unreachable!();
    }

    fn get_evac_center(&self, id: &str) -> Result<EvacCenter> {
        get_evac_center(&mut self.conn.borrow_mut(), id)
    }
    fn all_evac_centers(&self) -> Result<Vec<EvacCenter>> {
        all_evac_centers(&mut self.conn.borrow_mut())
    }
    fn count_evac_centers(&self) -> Result<usize> {
        count_evac_centers(&mut self.conn.borrow_mut())
    }
}

impl EvacCenterRepo for DbReadWrite<'_> {
    fn create_evac_center(&self, center: &EvacCenter) -> Result<()> {
        create_evac_center(&mut self.conn.borrow_mut(), center)
    }
    fn delete_evac_center(&self, id: &str) -> Result<()> {
        delete_evac_center(&mut self.conn.borrow_mut(), id)
    }

    fn get_evac_center(&self, id: &str) -> Result<EvacCenter> {
        get_evac_center(&mut self.conn.borrow_mut(), id)
    }
    fn all_evac_centers(&self) -> Result<Vec<EvacCenter>> {
        all_evac_centers(&mut self.conn.borrow_mut())
    }
    fn count_evac_centers(&self) -> Result<usize> {
        count_evac_centers(&mut self.conn.borrow_mut())
    }
}

impl EvacCenterRepo for DbConnection<'_> {
    fn create_evac_center(&self, center: &EvacCenter) -> Result<()> {
        create_evac_center(&mut self.conn.borrow_mut(), center)
    }
    fn delete_evac_center(&self, id: &str) -> Result<()> {
        delete_evac_center(&mut self.conn.borrow_mut(), id)
    }

    fn get_evac_center(&self, id: &str) -> Result<EvacCenter> {
        get_evac_center(&mut self.conn.borrow_mut(), id)
    }
    fn all_evac_centers(&self) -> Result<Vec<EvacCenter>> {
        all_evac_centers(&mut self.conn.borrow_mut())
    }
    fn count_evac_centers(&self) -> Result<usize> {
        count_evac_centers(&mut self.conn.borrow_mut())
    }
}

fn create_evac_center(conn: &mut SqliteConnection, center: &EvacCenter) -> Result<()> {
    let new_center = models::NewEvacCenter::from(center);
    diesel::insert_into(schema::evac_centers::table)
        .values(&new_center)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_evac_center(conn: &mut SqliteConnection, id: &str) -> Result<EvacCenter> {
    use schema::evac_centers::dsl;
    Ok(dsl::evac_centers
        .filter(dsl::id.eq(id))
        .first::<models::EvacCenterEntity>(conn)
        .map_err(from_diesel_err)?
        .into())
}

fn all_evac_centers(conn: &mut SqliteConnection) -> Result<Vec<EvacCenter>> {
    use schema::evac_centers::dsl;
    Ok(dsl::evac_centers
        .order_by(dsl::name.asc())
        .load::<models::EvacCenterEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(Into::into)
        .collect())
}

fn count_evac_centers(conn: &mut SqliteConnection) -> Result<usize> {
    use schema::evac_centers::dsl;
    Ok(dsl::evac_centers
        .select(diesel::dsl::count(dsl::id))
        .first::<i64>(conn)
        .map_err(from_diesel_err)? as usize)
}

fn delete_evac_center(conn: &mut SqliteConnection, id: &str) -> Result<()> {
    use schema::evac_centers::dsl;
    let count = diesel::delete(dsl::evac_centers.filter(dsl::id.eq(id)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}
