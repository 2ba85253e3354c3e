//! Entity definitions: table, path segment, and persisted fields for each resource.

use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug)]
pub struct FieldDef {
    pub name: &'static str,
    pub required: bool,
}

const fn required(name: &'static str) -> FieldDef {
    FieldDef { name, required: true }
}

const fn optional(name: &'static str) -> FieldDef {
    FieldDef { name, required: false }
}

/// Which body keys an entity persists.
#[derive(Clone, Copy, Debug)]
pub enum Fields {
    /// Every key the caller sends, except the primary key.
    Open,
    Declared(&'static [FieldDef]),
}

#[derive(Debug)]
pub struct EntityDef {
    pub name: &'static str,
    pub table_name: &'static str,
    pub path_segment: &'static str,
    pub pk_column: &'static str,
    pub fields: Fields,
}

static SUPPLIER_FIELDS: [FieldDef; 5] = [
    required("name"),
    optional("contact_name"),
    optional("contact_email"),
    optional("contact_phone"),
    optional("address"),
];

static ORDER_FIELDS: [FieldDef; 4] = [
    required("supplier_id"),
    required("order_date"),
    required("total_amount"),
    optional("status"),
];

pub static PRODUCTS: EntityDef = EntityDef {
    name: "product",
    table_name: "products",
    path_segment: "products",
    pk_column: "id",
    fields: Fields::Open,
};

pub static SUPPLIERS: EntityDef = EntityDef {
    name: "supplier",
    table_name: "suppliers",
    path_segment: "suppliers",
    pk_column: "id",
    fields: Fields::Declared(&SUPPLIER_FIELDS),
};

pub static ORDERS: EntityDef = EntityDef {
    name: "order",
    table_name: "orders",
    path_segment: "orders",
    pk_column: "id",
    fields: Fields::Declared(&ORDER_FIELDS),
};

/// All exposed entities, in route registration order.
pub fn entities() -> [&'static EntityDef; 3] {
    [&PRODUCTS, &SUPPLIERS, &ORDERS]
}

impl EntityDef {
    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> {
        let declared: &'static [FieldDef] = match self.fields {
            Fields::Open => &[],
            Fields::Declared(f) => f,
        };
        declared.iter().filter(|f| f.required).map(|f| f.name)
    }

    /// Project a request body onto the persisted fields. Declared entities keep only
    /// their declared fields (absent ones become null); open entities keep every key.
    /// The primary key is never taken from the body.
    pub fn shape(&self, body: &Map<String, Value>) -> Map<String, Value> {
        match self.fields {
            Fields::Open => body
                .iter()
                .filter(|(k, _)| k.as_str() != self.pk_column)
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            Fields::Declared(fields) => fields
                .iter()
                .map(|f| (f.name.to_string(), body.get(f.name).cloned().unwrap_or(Value::Null)))
                .collect(),
        }
    }

    /// `{pk: id, ...fields}`
    pub fn with_id(&self, id: Value, fields: Map<String, Value>) -> Value {
        let mut record = Map::with_capacity(fields.len() + 1);
        record.insert(self.pk_column.to_string(), id);
        record.extend(fields);
        Value::Object(record)
    }
}
