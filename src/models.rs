use diesel::prelude::{AsChangeset, Insertable, Queryable, Selectable};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;

use crate::schema::{clientes, funcionarios, itens_peca, itens_servico, ordens_de_servico, pecas, servicos, veiculos};

/// A record type exposed as a REST collection. Field names follow the
/// table columns, which are also the JSON field names on the wire.
pub trait Collection: Serialize + DeserializeOwned + Clone + Send + 'static {
    /// Every field except the generated key. Used for both create and
    /// full-replacement update.
    type Payload: Serialize + DeserializeOwned + Clone + Send + 'static;

    /// Path segment, e.g. `clientes` for `/clientes/{id}`.
    const PATH: &'static str;
    /// Singular display name, e.g. `Cliente`.
    const NAME: &'static str;
    /// Error body of a 404 on this collection.
    const NOT_FOUND: &'static str;
    /// Message returned after a successful delete.
    const REMOVED: &'static str;

    fn id(&self) -> i32;
    fn payload(&self) -> Self::Payload;
}

#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = clientes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Customer{
    pub id_cliente: i32,
    pub nome: String,
    pub telefone: Option<String>,
    pub email: Option<String>,
    pub endereco: Option<String>
}

#[derive(Insertable, AsChangeset, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = clientes, treat_none_as_null = true)]
pub struct CustomerPayload{
    pub nome: String,
    pub telefone: Option<String>,
    pub email: Option<String>,
    pub endereco: Option<String>
}

impl Collection for Customer {
    type Payload = CustomerPayload;
    const PATH: &'static str = "clientes";
    const NAME: &'static str = "Cliente";
    const NOT_FOUND: &'static str = "Cliente não encontrado";
    const REMOVED: &'static str = "Cliente removido com sucesso";

    fn id(&self) -> i32 {
        self.id_cliente
    }

    fn payload(&self) -> CustomerPayload {
        CustomerPayload{
            nome: self.nome.clone(),
            telefone: self.telefone.clone(),
            email: self.email.clone(),
            endereco: self.endereco.clone()
        }
    }
}

#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = funcionarios)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Employee{
    pub id_funcionario: i32,
    pub nome: String,
    pub cargo: Option<String>,
    pub telefone: Option<String>,
    pub data_admissao: Option<String>
}

#[derive(Insertable, AsChangeset, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = funcionarios, treat_none_as_null = true)]
pub struct EmployeePayload{
    pub nome: String,
    pub cargo: Option<String>,
    pub telefone: Option<String>,
    pub data_admissao: Option<String>
}

impl Collection for Employee {
    type Payload = EmployeePayload;
    const PATH: &'static str = "funcionarios";
    const NAME: &'static str = "Funcionário";
    const NOT_FOUND: &'static str = "Funcionário não encontrado";
    const REMOVED: &'static str = "Funcionário removido com sucesso";

    fn id(&self) -> i32 {
        self.id_funcionario
    }

    fn payload(&self) -> EmployeePayload {
        EmployeePayload{
            nome: self.nome.clone(),
            cargo: self.cargo.clone(),
            telefone: self.telefone.clone(),
            data_admissao: self.data_admissao.clone()
        }
    }
}

#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = veiculos)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Vehicle{
    pub id_veiculo: i32,
    pub id_cliente: i32,
    pub marca: Option<String>,
    pub modelo: Option<String>,
    pub ano: Option<i32>,
    pub placa: Option<String>
}

#[derive(Insertable, AsChangeset, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = veiculos, treat_none_as_null = true)]
pub struct VehiclePayload{
    pub id_cliente: i32,
    pub marca: Option<String>,
    pub modelo: Option<String>,
    pub ano: Option<i32>,
    pub placa: Option<String>
}

impl Collection for Vehicle {
    type Payload = VehiclePayload;
    const PATH: &'static str = "veiculos";
    const NAME: &'static str = "Veículo";
    const NOT_FOUND: &'static str = "Veículo não encontrado";
    const REMOVED: &'static str = "Veículo removido com sucesso";

    fn id(&self) -> i32 {
        self.id_veiculo
    }

    fn payload(&self) -> VehiclePayload {
        VehiclePayload{
            id_cliente: self.id_cliente,
            marca: self.marca.clone(),
            modelo: self.modelo.clone(),
            ano: self.ano,
            placa: self.placa.clone()
        }
    }
}

#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = pecas)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Part{
    pub id_peca: i32,
    pub nome: String,
    pub descricao: Option<String>,
    pub preco_unitario: f64,
    pub quantidade_estoque: i32
}

#[derive(Insertable, AsChangeset, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = pecas, treat_none_as_null = true)]
pub struct PartPayload{
    pub nome: String,
    pub descricao: Option<String>,
    pub preco_unitario: f64,
    pub quantidade_estoque: i32
}

impl Collection for Part {
    type Payload = PartPayload;
    const PATH: &'static str = "pecas";
    const NAME: &'static str = "Peça";
    const NOT_FOUND: &'static str = "Peça não encontrada";
    const REMOVED: &'static str = "Peça removida com sucesso";

    fn id(&self) -> i32 {
        self.id_peca
    }

    fn payload(&self) -> PartPayload {
        PartPayload{
            nome: self.nome.clone(),
            descricao: self.descricao.clone(),
            preco_unitario: self.preco_unitario,
            quantidade_estoque: self.quantidade_estoque
        }
    }
}

#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = servicos)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Service{
    pub id_servico: i32,
    pub descricao: String,
    pub preco: f64
}

#[derive(Insertable, AsChangeset, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = servicos)]
pub struct ServicePayload{
    pub descricao: String,
    pub preco: f64
}

impl Collection for Service {
    type Payload = ServicePayload;
    const PATH: &'static str = "servicos";
    const NAME: &'static str = "Serviço";
    const NOT_FOUND: &'static str = "Serviço não encontrado";
    const REMOVED: &'static str = "Serviço removido com sucesso";

    fn id(&self) -> i32 {
        self.id_servico
    }

    fn payload(&self) -> ServicePayload {
        ServicePayload{
            descricao: self.descricao.clone(),
            preco: self.preco
        }
    }
}

/// Dates are kept as the text the client sent (normally `YYYY-MM-DD`).
/// An open order may carry an empty `data_conclusao`.
#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = ordens_de_servico)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WorkOrder{
    pub id_ordem: i32,
    pub id_veiculo: i32,
    pub id_funcionario: i32,
    pub data_abertura: String,
    pub data_conclusao: Option<String>,
    pub observacoes: Option<String>
}

#[derive(Insertable, AsChangeset, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = ordens_de_servico, treat_none_as_null = true)]
pub struct WorkOrderPayload{
    pub id_veiculo: i32,
    pub id_funcionario: i32,
    pub data_abertura: String,
    pub data_conclusao: Option<String>,
    pub observacoes: Option<String>
}

impl Collection for WorkOrder {
    type Payload = WorkOrderPayload;
    const PATH: &'static str = "ordens_de_servico";
    const NAME: &'static str = "Ordem de serviço";
    const NOT_FOUND: &'static str = "Ordem de serviço não encontrada";
    const REMOVED: &'static str = "Ordem de serviço removida com sucesso";

    fn id(&self) -> i32 {
        self.id_ordem
    }

    fn payload(&self) -> WorkOrderPayload {
        WorkOrderPayload{
            id_veiculo: self.id_veiculo,
            id_funcionario: self.id_funcionario,
            data_abertura: self.data_abertura.clone(),
            data_conclusao: self.data_conclusao.clone(),
            observacoes: self.observacoes.clone()
        }
    }
}

#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = itens_peca)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PartLineItem{
    pub id_item: i32,
    pub id_ordem: i32,
    pub id_peca: i32,
    pub quantidade: i32,
    pub preco_unitario: Option<f64>
}

#[derive(Insertable, AsChangeset, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = itens_peca, treat_none_as_null = true)]
pub struct PartLineItemPayload{
    pub id_ordem: i32,
    pub id_peca: i32,
    pub quantidade: i32,
    pub preco_unitario: Option<f64>
}

impl Collection for PartLineItem {
    type Payload = PartLineItemPayload;
    const PATH: &'static str = "itens_peca";
    const NAME: &'static str = "Item de peça";
    const NOT_FOUND: &'static str = "Item de peça não encontrado";
    const REMOVED: &'static str = "Item de peça removido com sucesso";

    fn id(&self) -> i32 {
        self.id_item
    }

    fn payload(&self) -> PartLineItemPayload {
        PartLineItemPayload{
            id_ordem: self.id_ordem,
            id_peca: self.id_peca,
            quantidade: self.quantidade,
            preco_unitario: self.preco_unitario
        }
    }
}

#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = itens_servico)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ServiceLineItem{
    pub id_item: i32,
    pub id_ordem: i32,
    pub id_servico: i32,
    pub quantidade: Option<i32>,
    pub preco_unitario: Option<f64>
}

// On insert a missing quantidade falls back to the column default (1).
// On update it is written as NULL like every other omitted field.
#[derive(Insertable, AsChangeset, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = itens_servico, treat_none_as_null = true)]
pub struct ServiceLineItemPayload{
    pub id_ordem: i32,
    pub id_servico: i32,
    pub quantidade: Option<i32>,
    pub preco_unitario: Option<f64>
}

impl Collection for ServiceLineItem {
    type Payload = ServiceLineItemPayload;
    const PATH: &'static str = "itens_servico";
    const NAME: &'static str = "Item de serviço";
    const NOT_FOUND: &'static str = "Item de serviço não encontrado";
    const REMOVED: &'static str = "Item de serviço removido com sucesso";

    fn id(&self) -> i32 {
        self.id_item
    }

    fn payload(&self) -> ServiceLineItemPayload {
        ServiceLineItemPayload{
            id_ordem: self.id_ordem,
            id_servico: self.id_servico,
            quantidade: self.quantidade,
            preco_unitario: self.preco_unitario
        }
    }
}
