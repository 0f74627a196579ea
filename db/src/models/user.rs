use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::ConnectionTrait;
use serde::Serialize;

/// A staff account. Staff sign in through the university OAuth provider and
/// are matched on `email`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[serde(rename = "firstNameTH")]
    pub firstname_th: Option<String>,
    #[serde(rename = "lastNameTH")]
    pub lastname_th: Option<String>,
    #[serde(rename = "firstNameEN")]
    pub firstname_en: Option<String>,
    #[serde(rename = "lastNameEN")]
    pub lastname_en: Option<String>,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(rename = "counterId")]
    pub counter_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::counter::Entity",
        from = "Column::CounterId",
        to = "super::counter::Column::Id"
    )]
    Counter,
}

impl Related<super::counter::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Counter.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Thai and English names as reported by the identity provider.
#[derive(Debug, Clone, Default)]
pub struct ProfileNames<'a> {
    pub firstname_th: &'a str,
    pub lastname_th: &'a str,
    pub firstname_en: &'a str,
    pub lastname_en: &'a str,
}

impl Model {
    /// Creates a staff account with no names; they are filled in on first login.
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        email: &str,
        counter_id: i64,
    ) -> Result<Model, DbErr> {
        ActiveModel {
            email: Set(email.to_owned()),
            counter_id: Set(counter_id),
            firstname_th: Set(None),
            lastname_th: Set(None),
            firstname_en: Set(None),
            lastname_en: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn find_by_email<C: ConnectionTrait>(
        db: &C,
        email: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Email.eq(email))
            .one(db)
            .await
    }

    /// True when either English name has never been recorded.
    pub fn missing_english_name(&self) -> bool {
        self.firstname_en.is_none() || self.lastname_en.is_none()
    }

    /// Overwrites all four name fields.
    pub async fn update_names<C: ConnectionTrait>(
        self,
        db: &C,
        names: &ProfileNames<'_>,
    ) -> Result<Model, DbErr> {
        let mut active: ActiveModel = self.into();
        active.firstname_th = Set(Some(names.firstname_th.to_owned()));
        active.lastname_th = Set(Some(names.lastname_th.to_owned()));
        active.firstname_en = Set(Some(names.firstname_en.to_owned()));
        active.lastname_en = Set(Some(names.lastname_en.to_owned()));
        active.update(db).await
    }
}
