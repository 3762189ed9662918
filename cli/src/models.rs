use diesel::prelude::*;

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::restaurants)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[allow(dead_code)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub distinction: Option<String>,
    pub city: Option<String>,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::dishes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[allow(dead_code)]
pub struct Dish {
    pub id: i32,
    pub name: Option<String>,
    pub category: Option<String>,
    pub restaurant_id: i32,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::mentions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Mention {
    pub id: i32,
    pub dish_id: i32,
    pub ingredient: String,
    pub category: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::mentions)]
pub struct NewMention<'a> {
    pub dish_id: i32,
    pub ingredient: &'a str,
    pub category: &'a str,
}
