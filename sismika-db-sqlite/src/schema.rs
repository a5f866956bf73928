///////////////////////////////////////////////////////////////////////
// Earthquake catalog
///////////////////////////////////////////////////////////////////////

table! {
    earthquakes (id) {
        id -> Text,
        title -> Text,
        occurred_at -> BigInt,
        lng -> Double,
        lat -> Double,
        depth_km -> Double,
        ml -> Nullable<Double>,
        mb -> Nullable<Double>,
        ms -> Nullable<Double>,
        mw -> Double,
        local_intensity -> Text,
    }
}

///////////////////////////////////////////////////////////////////////
// Gazetteer
///////////////////////////////////////////////////////////////////////

table! {
    locations (psgc) {
        psgc -> Text,
        name -> Text,
        long_name -> Text,
        level -> SmallInt,
        population -> BigInt,
        lng -> Nullable<Double>,
        lat -> Nullable<Double>,
        // Four "lng,lat" corners separated by single spaces.
        bounds -> Nullable<Text>,
    }
}

///////////////////////////////////////////////////////////////////////
// Monitoring network
///////////////////////////////////////////////////////////////////////

table! {
    stations (code) {
        code -> Text,
        name -> Text,
        kind -> Text,
        lng -> Double,
        lat -> Double,
    }
}

table! {
    evac_centers (id) {
        id -> Text,
        name -> Text,
        lng -> Double,
        lat -> Double,
    }
}

///////////////////////////////////////////////////////////////////////
// Users
///////////////////////////////////////////////////////////////////////

table! {
    users (subject) {
        subject -> Text,
        name -> Text,
        email -> Text,
        picture -> Text,
        permission -> SmallInt,
    }
}

table! {
    pending_sessions (id) {
        id -> Text,
        nonce -> Text,
        expires_at -> BigInt,
    }
}

table! {
    sessions (id) {
        id -> Text,
        user_subject -> Text,
        expires_at -> BigInt,
    }
}

joinable!(sessions -> users (user_subject));
