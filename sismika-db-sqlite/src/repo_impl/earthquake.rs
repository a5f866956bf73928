use super::*;

impl EarthquakeRepo for DbReadOnly<'_> {
    fn create_earthquake(&self, _event: &EarthquakeEvent) -> Result<()> {
        unreachable!();
    }
    fn update_earthquake_title(&self, _id: &str, _title: &str) -> Result<()> {
        unreachable!();
    }
    fn delete_earthquake(&self, _id: &str) -> Result<()> {
        unreachable!();
    }

    fn get_earthquake(&self, id: &str) -> Result<EarthquakeEvent> {
        get_earthquake(&mut self.conn.borrow_mut(), id)
    }
    fn all_earthquakes(&self) -> Result<Vec<EarthquakeEvent>> {
        all_earthquakes(&mut self.conn.borrow_mut())
    }
    fn count_earthquakes(&self) -> Result<usize> {
        count_earthquakes(&mut self.conn.borrow_mut())
    }
    fn query_earthquakes(&self, query: &EarthquakeQuery) -> Result<EarthquakePage> {
        query_earthquakes(&mut self.conn.borrow_mut(), query)
    }
}

impl EarthquakeRepo for DbReadWrite<'_> {
    fn create_earthquake(&self, event: &EarthquakeEvent) -> Result<()> {
        create_earthquake(&mut self.conn.borrow_mut(), event)
    }
    fn update_earthquake_title(&self, id: &str, title: &str) -> Result<()> {
        update_earthquake_title(&mut self.conn.borrow_mut(), id, title)
    }
    fn delete_earthquake(&self, id: &str) -> Result<()> {
        delete_earthquake(&mut self.conn.borrow_mut(), id)
    }

    fn get_earthquake(&self, id: &str) -> Result<EarthquakeEvent> {
        get_earthquake(&mut self.conn.borrow_mut(), id)
    }
    fn all_earthquakes(&self) -> Result<Vec<EarthquakeEvent>> {
        all_earthquakes(&mut self.conn.borrow_mut())
    }
    fn count_earthquakes(&self) -> Result<usize> {
        count_earthquakes(&mut self.conn.borrow_mut())
    }
    fn query_earthquakes(&self, query: &EarthquakeQuery) -> Result<EarthquakePage> {
        query_earthquakes(&mut self.conn.borrow_mut(), query)
    }
}

impl EarthquakeRepo for DbConnection<'_> {
    fn create_earthquake(&self, event: &EarthquakeEvent) -> Result<()> {
        create_earthquake(&mut self.conn.borrow_mut(), event)
    }
    fn update_earthquake_title(&self, id: &str, title: &str) -> Result<()> {
        update_earthquake_title(&mut self.conn.borrow_mut(), id, title)
    }
    fn delete_earthquake(&self, id: &str) -> Result<()> {
        delete_earthquake(&mut self.conn.borrow_mut(), id)
    }

    fn get_earthquake(&self, id: &str) -> Result<EarthquakeEvent> {
        get_earthquake(&mut self.conn.borrow_mut(), id)
    }
    fn all_earthquakes(&self) -> Result<Vec<EarthquakeEvent>> {
        all_earthquakes(&mut self.conn.borrow_mut())
    }
    fn count_earthquakes(&self) -> Result<usize> {
        count_earthquakes(&mut self.conn.borrow_mut())
    }
    fn query_earthquakes(&self, query: &EarthquakeQuery) -> Result<EarthquakePage> {
        query_earthquakes(&mut self.conn.borrow_mut(), query)
    }
}

fn create_earthquake(conn: &mut SqliteConnection, event: &EarthquakeEvent) -> Result<()> {
    let new_earthquake = models::NewEarthquake::from(event);
    diesel::insert_into(schema::earthquakes::table)
        .values(&new_earthquake)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_earthquake(conn: &mut SqliteConnection, id: &str) -> Result<EarthquakeEvent> {
    use schema::earthquakes::dsl;
    Ok(dsl::earthquakes
        .filter(dsl::id.eq(id))
        .first::<models::EarthquakeEntity>(conn)
        .map_err(from_diesel_err)?
        .into())
}

fn all_earthquakes(conn: &mut SqliteConnection) -> Result<Vec<EarthquakeEvent>> {
    use schema::earthquakes::dsl;
    Ok(dsl::earthquakes
        .load::<models::EarthquakeEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(Into::into)
        .collect())
}

fn count_earthquakes(conn: &mut SqliteConnection) -> Result<usize> {
    use schema::earthquakes::dsl;
    Ok(dsl::earthquakes
        .select(diesel::dsl::count(dsl::id))
        .first::<i64>(conn)
        .map_err(from_diesel_err)? as usize)
}

fn query_earthquakes(
    conn: &mut SqliteConnection,
    query: &EarthquakeQuery,
) -> Result<EarthquakePage> {
    use schema::earthquakes::dsl;

    let mut catalog = dsl::earthquakes.into_boxed();
    for condition in query.predicate.conditions() {
        catalog = match *condition {
            Condition::DepthAtLeast(min) => catalog.filter(dsl::depth_km.ge(min)),
            Condition::DepthAtMost(max) => catalog.filter(dsl::depth_km.le(max)),
            Condition::IntensityAtLeast(min) => catalog.filter(dsl::mw.ge(min)),
            Condition::IntensityAtMost(max) => catalog.filter(dsl::mw.le(max)),
            Condition::TimeAtEarliest(min) => catalog.filter(dsl::occurred_at.ge(min.as_secs())),
            Condition::TimeAtLatest(max) => catalog.filter(dsl::occurred_at.le(max.as_secs())),
            Condition::WithinBounds(ref bounds) => {
                // The envelope is engine-friendly, the exact quad check
                // happens in the refinement below.
                let (sw, ne) = bounds.envelope();
                catalog
                    .filter(dsl::lng.ge(sw.lng()))
                    .filter(dsl::lng.le(ne.lng()))
                    .filter(dsl::lat.ge(sw.lat()))
                    .filter(dsl::lat.le(ne.lat()))
            }
            Condition::WithinCap(ref cap) => {
                // A latitude difference is a lower bound on the central
                // angle, so the band never drops a hit. Longitude wraps
                // and stays out of the prefilter.
                let band_deg = cap.angular_radius_rad().to_degrees();
                catalog
                    .filter(dsl::lat.ge(cap.center().lat() - band_deg))
                    .filter(dsl::lat.le(cap.center().lat() + band_deg))
            }
        };
    }

    let mut keys = query.sort.keys().iter();
    if let Some(first) = keys.next() {
        catalog = match first {
            SortKey::Depth => catalog.order_by(dsl::depth_km.asc()),
            SortKey::Intensity => catalog.order_by(dsl::mw.asc()),
            SortKey::Time => catalog.order_by(dsl::occurred_at.asc()),
        };
        for key in keys {
            catalog = match key {
                SortKey::Depth => catalog.then_order_by(dsl::depth_km.asc()),
                SortKey::Intensity => catalog.then_order_by(dsl::mw.asc()),
                SortKey::Time => catalog.then_order_by(dsl::occurred_at.asc()),
            };
        }
    }

    let candidates = catalog
        .load::<models::EarthquakeEntity>(conn)
        .map_err(from_diesel_err)?;

    // The engine only prefilters. The predicate stays the authority on
    // what matches, so all store backends agree on the result set.
    let matches: Vec<EarthquakeEvent> = candidates
        .into_iter()
        .map(EarthquakeEvent::from)
        .filter(|event| query.predicate.matches(event))
        .collect();

    let total_count = matches.len() as u64;
    let offset = query.pagination.offset.unwrap_or(0) as usize;
    let limit = query.pagination.limit.map_or(usize::MAX, |limit| limit as usize);
    let events = matches.into_iter().skip(offset).take(limit).collect();
    Ok(EarthquakePage {
        events,
        total_count,
    })
}

fn update_earthquake_title(conn: &mut SqliteConnection, id: &str, title: &str) -> Result<()> {
    use schema::earthquakes::dsl;
    let count = diesel::update(dsl::earthquakes.filter(dsl::id.eq(id)))
        .set(dsl::title.eq(title))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn delete_earthquake(conn: &mut SqliteConnection, id: &str) -> Result<()> {
    use schema::earthquakes::dsl;
    let count = diesel::delete(dsl::earthquakes.filter(dsl::id.eq(id)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}
