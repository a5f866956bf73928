use super::*;

impl StationRepo for DbReadOnly<'_> {
    fn create_station(&self, _station: &SeismicStation) -> Result<()> {
        unreachable!();
    }
    fn delete_station(&self, _code: &str) -> Result<()> {
        unreachable!();
    }

    fn get_station(&self, code: &str) -> Result<SeismicStation> {
        get_station(&mut self.conn.borrow_mut(), code)
    }
    fn all_stations(&self) -> Result<Vec<SeismicStation>> {
        all_stations(&mut self.conn.borrow_mut())
    }
    fn count_stations(&self) -> Result<usize> {
        count_stations(&mut self.conn.borrow_mut())
    }
}

impl StationRepo for DbReadWrite<'_> {
    fn create_station(&self, station: &SeismicStation) -> Result<()> {
        create_station(&mut self.conn.borrow_mut(), station)
    }
    fn delete_station(&self, code: &str) -> Result<()> {
        delete_station(&mut self.conn.borrow_mut(), code)
    }

    fn get_station(&self, code: &str) -> Result<SeismicStation> {
        get_station(&mut self.conn.borrow_mut(), code)
    }
    fn all_stations(&self) -> Result<Vec<SeismicStation>> {
        all_stations(&mut self.conn.borrow_mut())
    }
    fn count_stations(&self) -> Result<usize> {
        count_stations(&mut self.conn.borrow_mut())
    }
}

impl StationRepo for DbConnection<'_> {
    fn create_station(&self, station: &SeismicStation) -> Result<()> {
        create_station(&mut self.conn.borrow_mut(), station)
    }
    fn delete_station(&self, code: &str) -> Result<()> {
        delete_station(&mut self.conn.borrow_mut(), code)
    }

    fn get_station(&self, code: &str) -> Result<SeismicStation> {
        get_station(&mut self.conn.borrow_mut(), code)
    }
    fn all_stations(&self) -> Result<Vec<SeismicStation>> {
        all_stations(&mut self.conn.borrow_mut())
    }
    fn count_stations(&self) -> Result<usize> {
        count_stations(&mut self.conn.borrow_mut())
    }
}

fn create_station(conn: &mut SqliteConnection, station: &SeismicStation) -> Result<()> {
    let new_station = models::NewStation::from(station);
    diesel::insert_into(schema::stations::table)
        .values(&new_station)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_station(conn: &mut SqliteConnection, code: &str) -> Result<SeismicStation> {
    use schema::stations::dsl;
    Ok(dsl::stations
        .filter(dsl::code.eq(code))
        .first::<models::StationEntity>(conn)
        .map_err(from_diesel_err)?
        .into())
}

fn all_stations(conn: &mut SqliteConnection) -> Result<Vec<SeismicStation>> {
    use schema::stations::dsl;
    Ok(dsl::stations
        .order_by(dsl::code.asc())
        .load::<models::StationEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(Into::into)
        .collect())
}

fn count_stations(conn: &mut SqliteConnection) -> Result<usize> {
    use schema::stations::dsl;
    Ok(dsl::stations
        .select(diesel::dsl::count(dsl::code))
        .first::<i64>(conn)
        .map_err(from_diesel_err)? as usize)
}

fn delete_station(conn: &mut SqliteConnection, code: &str) -> Result<()> {
    use schema::stations::dsl;
    let count = diesel::delete(dsl::stations.filter(dsl::code.eq(code)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}
