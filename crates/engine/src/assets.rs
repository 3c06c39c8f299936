//! Assets: a quantity of some value category, optionally held in a wallet.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub canvas_id: Option<i32>,
    pub name: String,
    pub value_category_id: i32,
    pub wallet_id: Option<i32>,
    pub owner_id: Option<i32>,
    #[sea_orm(column_type = "Decimal(Some((20, 8)))")]
    pub quantity: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 8)))", nullable)]
    pub purchase_price: Option<Decimal>,
    pub purchase_currency_id: Option<i32>,
    pub purchase_date: Option<DateTimeUtc>,
    #[sea_orm(column_type = "Decimal(Some((20, 8)))", nullable)]
    pub current_value: Option<Decimal>,
    pub description: Option<Json>,
    pub photo_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub created_by: Option<i32>,
    pub last_modified_at: DateTimeUtc,
    pub last_modified_by: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::wallets::Entity",
        from = "Column::WalletId",
        to = "super::wallets::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Wallets,
}

impl Related<super::wallets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wallets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
