// Mirrors migrations/2025-01-01-000000_create_workshop_tables/up.sql

diesel::table! {
    clientes (id_cliente) {
        id_cliente -> Integer,
        nome -> Text,
        telefone -> Nullable<Text>,
        email -> Nullable<Text>,
        endereco -> Nullable<Text>,
    }
}

diesel::table! {
    funcionarios (id_funcionario) {
        id_funcionario -> Integer,
        nome -> Text,
        cargo -> Nullable<Text>,
        telefone -> Nullable<Text>,
        data_admissao -> Nullable<Text>,
    }
}

diesel::table! {
    veiculos (id_veiculo) {
        id_veiculo -> Integer,
        id_cliente -> Integer,
        marca -> Nullable<Text>,
        modelo -> Nullable<Text>,
        ano -> Nullable<Integer>,
        placa -> Nullable<Text>,
    }
}

diesel::table! {
    pecas (id_peca) {
        id_peca -> Integer,
        nome -> Text,
        descricao -> Nullable<Text>,
        preco_unitario -> Double,
        quantidade_estoque -> Integer,
    }
}

diesel::table! {
    servicos (id_servico) {
        id_servico -> Integer,
        descricao -> Text,
        preco -> Double,
    }
}

diesel::table! {
    ordens_de_servico (id_ordem) {
        id_ordem -> Integer,
        id_veiculo -> Integer,
        id_funcionario -> Integer,
        data_abertura -> Text,
        data_conclusao -> Nullable<Text>,
        observacoes -> Nullable<Text>,
    }
}

diesel::table! {
    itens_peca (id_item) {
        id_item -> Integer,
        id_ordem -> Integer,
        id_peca -> Integer,
        quantidade -> Integer,
        preco_unitario -> Nullable<Double>,
    }
}

diesel::table! {
    itens_servico (id_item) {
        id_item -> Integer,
        id_ordem -> Integer,
        id_servico -> Integer,
        quantidade -> Nullable<Integer>,
        preco_unitario -> Nullable<Double>,
    }
}

diesel::joinable!(veiculos -> clientes (id_cliente));
diesel::joinable!(ordens_de_servico -> veiculos (id_veiculo));
diesel::joinable!(ordens_de_servico -> funcionarios (id_funcionario));
diesel::joinable!(itens_peca -> ordens_de_servico (id_ordem));
diesel::joinable!(itens_peca -> pecas (id_peca));
diesel::joinable!(itens_servico -> ordens_de_servico (id_ordem));
diesel::joinable!(itens_servico -> servicos (id_servico));

diesel::allow_tables_to_appear_in_same_query!(
    clientes,
    funcionarios,
    veiculos,
    pecas,
    servicos,
    ordens_de_servico,
    itens_peca,
    itens_servico,
);
