use super::*;

impl LocationRepo for DbReadOnly<'_> {
    fn create_or_replace_location(&self, _location: &Location) -> Result<()> {
        unreachable!();
    }

    fn get_location(&self, psgc: &PsgcCode) -> Result<Location> {
        get_location(&mut self.conn.borrow_mut(), psgc)
    }
    fn count_locations(&self) -> Result<usize> {
        count_locations(&mut self.conn.borrow_mut())
    }
    fn locations_at_level(
        &self,
        level: GeographicLevel,
        pagination: &Pagination,
    ) -> Result<LocationPage> {
        locations_at_level(&mut self.conn.borrow_mut(), level, pagination)
    }
    fn locations_near(&self, point: MapPoint, limit: u64) -> Result<Vec<Location>> {
        locations_near(&mut self.conn.borrow_mut(), point, limit)
    }
    fn locations_within_cap(&self, cap: &SphericalCap) -> Result<Vec<Location>> {
        locations_within_cap(&mut self.conn.borrow_mut(), cap)
    }
    fn locations_within_bounds(&self, bounds: &GeoBounds) -> Result<Vec<Location>> {
        locations_within_bounds(&mut self.conn.borrow_mut(), bounds)
    }
}

impl LocationRepo for DbReadWrite<'_> {
    fn create_or_replace_location(&self, location: &Location) -> Result<()> {
        create_or_replace_location(&mut self.conn.borrow_mut(), location)
    }

    fn get_location(&self, psgc: &PsgcCode) -> Result<Location> {
        get_location(&mut self.conn.borrow_mut(), psgc)
    }
    fn count_locations(&self) -> Result<usize> {
        count_locations(&mut self.conn.borrow_mut())
    }
    fn locations_at_level(
        &self,
        level: GeographicLevel,
        pagination: &Pagination,
    ) -> Result<LocationPage> {
        locations_at_level(&mut self.conn.borrow_mut(), level, pagination)
    }
    fn locations_near(&self, point: MapPoint, limit: u64) -> Result<Vec<Location>> {
        locations_near(&mut self.conn.borrow_mut(), point, limit)
    }
    fn locations_within_cap(&self, cap: &SphericalCap) -> Result<Vec<Location>> {
        locations_within_cap(&mut self.conn.borrow_mut(), cap)
    }
    fn locations_within_bounds(&self, bounds: &GeoBounds) -> Result<Vec<Location>> {
        locations_within_bounds(&mut self.conn.borrow_mut(), bounds)
    }
}

impl LocationRepo for DbConnection<'_> {
    fn create_or_replace_location(&self, location: &Location) -> Result<()> {
        create_or_replace_location(&mut self.conn.borrow_mut(), location)
    }

    fn get_location(&self, psgc: &PsgcCode) -> Result<Location> {
        get_location(&mut self.conn.borrow_mut(), psgc)
    }
    fn count_locations(&self) -> Result<usize> {
        count_locations(&mut self.conn.borrow_mut())
    }
    fn locations_at_level(
        &self,
        level: GeographicLevel,
        pagination: &Pagination,
    ) -> Result<LocationPage> {
        locations_at_level(&mut self.conn.borrow_mut(), level, pagination)
    }
    fn locations_near(&self, point: MapPoint, limit: u64) -> Result<Vec<Location>> {
        locations_near(&mut self.conn.borrow_mut(), point, limit)
    }
    fn locations_within_cap(&self, cap: &SphericalCap) -> Result<Vec<Location>> {
        locations_within_cap(&mut self.conn.borrow_mut(), cap)
    }
    fn locations_within_bounds(&self, bounds: &GeoBounds) -> Result<Vec<Location>> {
        locations_within_bounds(&mut self.conn.borrow_mut(), bounds)
    }
}

fn create_or_replace_location(conn: &mut SqliteConnection, location: &Location) -> Result<()> {
    let new_location = models::NewLocation::from(location);
    diesel::replace_into(schema::locations::table)
        .values(&new_location)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_location(conn: &mut SqliteConnection, psgc: &PsgcCode) -> Result<Location> {
    use schema::locations::dsl;
    let entity = dsl::locations
        .filter(dsl::psgc.eq(psgc.as_str()))
        .first::<models::LocationEntity>(conn)
        .map_err(from_diesel_err)?;
    load_location(entity)
}

fn count_locations(conn: &mut SqliteConnection) -> Result<usize> {
    use schema::locations::dsl;
    Ok(dsl::locations
        .select(diesel::dsl::count(dsl::psgc))
        .first::<i64>(conn)
        .map_err(from_diesel_err)? as usize)
}

fn locations_at_level(
    conn: &mut SqliteConnection,
    level: GeographicLevel,
    pagination: &Pagination,
) -> Result<LocationPage> {
    use schema::locations::dsl;
    let total_count = dsl::locations
        .select(diesel::dsl::count(dsl::psgc))
        .filter(dsl::level.eq(level as i16))
        .first::<i64>(conn)
        .map_err(from_diesel_err)? as u64;
    let mut page = dsl::locations
        .filter(dsl::level.eq(level as i16))
        .order_by(dsl::psgc.asc())
        .into_boxed();
    if let Some(offset) = pagination.offset {
        page = page.offset(offset as i64);
    }
    if let Some(limit) = pagination.limit {
        page = page.limit(limit as i64);
    }
    let locations = page
        .load::<models::LocationEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_location)
        .collect::<Result<_>>()?;
    Ok(LocationPage {
        locations,
        total_count,
    })
}

fn locations_near(
    conn: &mut SqliteConnection,
    point: MapPoint,
    limit: u64,
) -> Result<Vec<Location>> {
    use schema::locations::dsl;
    if limit == 0 {
        return Ok(vec![]);
    }
    // A latitude difference is a lower bound on the central angle, so a
    // band around the target latitude never hides a closer entry. Start
    // narrow and widen until the farthest hit lies safely inside.
    let mut band_deg = 1.0_f64;
    loop {
        let min_lat = (point.lat() - band_deg).max(-90.0);
        let max_lat = (point.lat() + band_deg).min(90.0);
        let entities = dsl::locations
            .filter(dsl::lat.is_not_null())
            .filter(dsl::lat.ge(min_lat))
            .filter(dsl::lat.le(max_lat))
            .load::<models::LocationEntity>(conn)
            .map_err(from_diesel_err)?;
        let mut hits = Vec::with_capacity(entities.len());
        for entity in entities {
            let location = load_location(entity)?;
            if let Some(pos) = location.pos {
                hits.push((point.central_angle_rad(pos), location));
            }
        }
        hits.sort_by(|(a, a_loc), (b, b_loc)| {
            a.total_cmp(b).then_with(|| a_loc.psgc.cmp(&b_loc.psgc))
        });
        hits.truncate(limit as usize);

        let whole_band = min_lat <= -90.0 && max_lat >= 90.0;
        let saturated = hits.len() == limit as usize
            && hits
                .last()
                .is_some_and(|(angle, _)| *angle <= band_deg.to_radians());
        if whole_band || saturated {
            return Ok(hits.into_iter().map(|(_, location)| location).collect());
        }
        band_deg *= 4.0;
    }
}

fn locations_within_cap(conn: &mut SqliteConnection, cap: &SphericalCap) -> Result<Vec<Location>> {
    use schema::locations::dsl;
    let band_deg = cap.angular_radius_rad().to_degrees();
    let entities = dsl::locations
        .filter(dsl::lat.is_not_null())
        .filter(dsl::lat.ge(cap.center().lat() - band_deg))
        .filter(dsl::lat.le(cap.center().lat() + band_deg))
        .load::<models::LocationEntity>(conn)
        .map_err(from_diesel_err)?;
    let mut hits = Vec::new();
    for entity in entities {
        let location = load_location(entity)?;
        if location.pos.is_some_and(|pos| cap.contains(pos)) {
            hits.push(location);
        }
    }
    Ok(hits)
}

fn locations_within_bounds(
    conn: &mut SqliteConnection,
    bounds: &GeoBounds,
) -> Result<Vec<Location>> {
    use schema::locations::dsl;
    let (sw, ne) = bounds.envelope();
    let entities = dsl::locations
        .filter(dsl::lat.is_not_null())
        .filter(dsl::lat.ge(sw.lat()))
        .filter(dsl::lat.le(ne.lat()))
        .filter(dsl::lng.ge(sw.lng()))
        .filter(dsl::lng.le(ne.lng()))
        .load::<models::LocationEntity>(conn)
        .map_err(from_diesel_err)?;
    let mut hits = Vec::new();
    for entity in entities {
        let location = load_location(entity)?;
        if location.pos.is_some_and(|pos| bounds.contains(pos)) {
            hits.push(location);
        }
    }
    Ok(hits)
}
