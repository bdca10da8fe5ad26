use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::models::listing::{ListingRecord, NewListing, UserProfile};

const LISTING_COLUMNS: &str = "id, name, price, category, gender, size, condition, brand, \
     months_used, image_url, seller_name, seller_id, trust_score, water_saved, co2_prevented, \
     waste_diverted, landfill_prevented, lifecycle_extended, sustainability_grade, created_at";

fn row_to_listing(row: &PgRow) -> Result<ListingRecord, sqlx::Error> {
    Ok(ListingRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        price: row.try_get("price")?,
        category: row.try_get("category")?,
        gender: row.try_get("gender")?,
        size: row.try_get("size")?,
        condition: row.try_get("condition")?,
        brand: row.try_get("brand")?,
        months_used: row.try_get("months_used")?,
        image_url: row.try_get("image_url")?,
        seller_name: row.try_get("seller_name")?,
        seller_id: row.try_get("seller_id")?,
        trust_score: row.try_get("trust_score")?,
        water_saved: row.try_get("water_saved")?,
        co2_prevented: row.try_get("co2_prevented")?,
        waste_diverted: row.try_get("waste_diverted")?,
        landfill_prevented: row.try_get("landfill_prevented")?,
        lifecycle_extended: row.try_get("lifecycle_extended")?,
        sustainability_grade: row.try_get("sustainability_grade")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Persist a valuated, sellable item as a single atomic insert.
pub async fn insert_listing(
    pool: &PgPool,
    listing: &NewListing,
) -> Result<ListingRecord, sqlx::Error> {
    let sql = format!(
        r#"
        INSERT INTO items (
            name, price, category, gender, size, condition, brand, months_used,
            image_url, seller_name, seller_id, trust_score, water_saved, co2_prevented,
            waste_diverted, landfill_prevented, lifecycle_extended, sustainability_grade
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
        RETURNING {LISTING_COLUMNS}
        "#
    );

    let row = sqlx::query(&sql)
        .bind(&listing.name)
        .bind(listing.price)
        .bind(&listing.category)
        .bind(&listing.gender)
        .bind(&listing.size)
        .bind(&listing.condition)
        .bind(&listing.brand)
        .bind(listing.months_used)
        .bind(&listing.image_url)
        .bind(&listing.seller_name)
        .bind(&listing.seller_id)
        .bind(listing.trust_score)
        .bind(listing.water_saved)
        .bind(listing.co2_prevented)
        .bind(listing.waste_diverted)
        .bind(listing.landfill_prevented)
        .bind(listing.lifecycle_extended)
        .bind(&listing.sustainability_grade)
        .fetch_one(pool)
        .await?;

    row_to_listing(&row)
}

/// All listings, newest first.
pub async fn list_items(pool: &PgPool) -> Result<Vec<ListingRecord>, sqlx::Error> {
    let sql = format!("SELECT {LISTING_COLUMNS} FROM items ORDER BY created_at DESC");
    let rows = sqlx::query(&sql).fetch_all(pool).await?;
    rows.iter().map(row_to_listing).collect()
}

/// A single listing by id.
pub async fn get_item(pool: &PgPool, id: i64) -> Result<Option<ListingRecord>, sqlx::Error> {
    let sql = format!("SELECT {LISTING_COLUMNS} FROM items WHERE id = $1");
    let row = sqlx::query(&sql).bind(id).fetch_optional(pool).await?;
    row.as_ref().map(row_to_listing).transpose()
}

fn row_to_user(row: &PgRow) -> Result<UserProfile, sqlx::Error> {
    Ok(UserProfile {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        bio: row.try_get("bio")?,
        avatar: row.try_get("avatar")?,
        total_impact_score: row.try_get("total_impact_score")?,
        items_reused: row.try_get("items_reused")?,
    })
}

pub async fn get_user(pool: &PgPool, id: &str) -> Result<Option<UserProfile>, sqlx::Error> {
    let row = sqlx::query(
        "SELECT id, name, email, bio, avatar, total_impact_score, items_reused \
         FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    row.as_ref().map(row_to_user).transpose()
}

/// Update the editable profile fields. Returns false when the user is absent.
pub async fn update_user(
    pool: &PgPool,
    id: &str,
    name: &str,
    bio: Option<&str>,
    avatar: Option<&str>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET name = $1, bio = $2, avatar = $3 WHERE id = $4")
        .bind(name)
        .bind(bio)
        .bind(avatar)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
