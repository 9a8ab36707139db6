use std::marker::{self, PhantomData};

use crate::dao::Gateway;

#[derive(Debug)]
pub struct Table<T> {
    pub gateway: Gateway,
    _phantomdata: marker::PhantomData<T>,
}

impl<T> Table<T> {
    pub fn new(gateway: Gateway) -> Self {
        Table {
            gateway,
            _phantomdata: PhantomData,
        }
    }
}

impl<T> Clone for Table<T> {
    fn clone(&self) -> Self {
        Table::new(self.gateway.clone())
    }
}
