pub use self::{
    gateway::{Gateway, Param},
    path::get_path,
    types::{
        ConnectOptions, DBArguments, DBRow, DataBase, PoolOption, PoolType,
        DUPLICATE_ERROR,
    },
};
mod gateway;
mod path;
mod statement;
mod types;
