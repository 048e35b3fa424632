use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, QueryResult, RunQueryDsl, SelectableHelper, SqliteConnection};

use super::Resource;
use crate::models::{Customer, Employee, Part, PartLineItem, Service, ServiceLineItem, Vehicle, WorkOrder};
use crate::schema::{clientes, funcionarios, itens_peca, itens_servico, ordens_de_servico, pecas, servicos, veiculos};

// Every table has the same shape: an integer key plus plain columns.
macro_rules! impl_resource {
    ($model:ty, $table:ident, $key:ident) => {
        impl Resource for $model {
            fn load_all(conn: &mut SqliteConnection) -> QueryResult<Vec<Self>> {
                $table::table
                    .order($table::$key.asc())
                    .select(<$model>::as_select())
                    .load(conn)
            }

            fn find(conn: &mut SqliteConnection, id: i32) -> QueryResult<Option<Self>> {
                $table::table
                    .find(id)
                    .select(<$model>::as_select())
                    .first(conn)
                    .optional()
            }

            fn insert(conn: &mut SqliteConnection, payload: Self::Payload) -> QueryResult<Self> {
                diesel::insert_into($table::table)
                    .values(payload)
                    .returning(<$model>::as_returning())
                    .get_result(conn)
            }

            fn replace(conn: &mut SqliteConnection, id: i32, payload: Self::Payload) -> QueryResult<Option<Self>> {
                diesel::update($table::table.find(id))
                    .set(payload)
                    .returning(<$model>::as_returning())
                    .get_result(conn)
                    .optional()
            }

            fn remove(conn: &mut SqliteConnection, id: i32) -> QueryResult<usize> {
                diesel::delete($table::table.find(id))
                    .execute(conn)
            }
        }
    };
}

impl_resource!(Customer, clientes, id_cliente);
impl_resource!(Employee, funcionarios, id_funcionario);
impl_resource!(Vehicle, veiculos, id_veiculo);
impl_resource!(Part, pecas, id_peca);
impl_resource!(Service, servicos, id_servico);
impl_resource!(WorkOrder, ordens_de_servico, id_ordem);
impl_resource!(PartLineItem, itens_peca, id_item);
impl_resource!(ServiceLineItem, itens_servico, id_item);
