//! Built-in content dataset: destinations, per-service copy and the shared
//! advantage pool.
//!
//! The dataset is constructed, not a module-level singleton, so tests can
//! substitute fixtures. Copy strings are templates; `{location}` is the
//! only placeholder the renderer substitutes.

use crate::types::{
    Advantage, Faq, LocationEntry, ServiceCatalog, ServiceConfig,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Fixed tail appended to every meta description. It is embedded verbatim
/// in meta tags and in the Service schema, so it must never drift.
pub const META_DESCRIPTION_SUFFIX: &str = " Servizio premium con autisti professionisti, auto di alta gamma e prezzi trasparenti. Prenota ora!";

/// Province plate codes the dataset is allowed to use.
pub const KNOWN_PROVINCES: &[&str] = &["BA", "BR", "BT", "FG", "LE", "TA", "MT"];

/// Raw destinations grouped by category. The same place may appear in more
/// than one group; flattening collapses duplicates first-seen-wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationGroup {
    pub category: String,
    pub locations: Vec<LocationEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub groups: Vec<LocationGroup>,
    pub services: ServiceCatalog,
    pub advantages: Vec<Advantage>,
}

impl Dataset {
    pub fn builtin() -> Dataset {
        Dataset {
            groups: builtin_groups(),
            services: builtin_services(),
            advantages: builtin_advantages(),
        }
    }

    /// All destinations in group order, duplicate names collapsed
    /// first-seen-wins.
    pub fn flatten_locations(&self) -> Vec<LocationEntry> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut out = Vec::new();
        for group in &self.groups {
            for location in &group.locations {
                if seen.insert(location.name.as_str()) {
                    out.push(location.clone());
                }
            }
        }
        out
    }

    /// Case-insensitive lookup by destination name.
    pub fn find_location(&self, name: &str) -> Option<LocationEntry> {
        self.flatten_locations()
            .into_iter()
            .find(|location| location.name.eq_ignore_ascii_case(name.trim()))
    }
}

fn place(name: &str, description: &str, province: &str, category: &str) -> LocationEntry {
    LocationEntry {
        name: name.to_string(),
        description: description.to_string(),
        province: province.to_string(),
        is_province: false,
        location: None,
        category: category.to_string(),
    }
}

fn capital(name: &str, description: &str, province: &str, category: &str) -> LocationEntry {
    LocationEntry {
        is_province: true,
        ..place(name, description, province, category)
    }
}

fn hamlet(
    name: &str,
    description: &str,
    province: &str,
    parent: &str,
    category: &str,
) -> LocationEntry {
    LocationEntry {
        location: Some(parent.to_string()),
        ..place(name, description, province, category)
    }
}

fn builtin_groups() -> Vec<LocationGroup> {
    vec![
        LocationGroup {
            category: "citta".to_string(),
            locations: vec![
                capital(
                    "Bari",
                    "Capoluogo della Puglia, tra il lungomare, la città vecchia e la Basilica di San Nicola.",
                    "BA",
                    "citta",
                ),
                capital(
                    "Lecce",
                    "La capitale del barocco salentino, con piazza Sant'Oronzo e l'anfiteatro romano.",
                    "LE",
                    "citta",
                ),
                capital(
                    "Brindisi",
                    "Città portuale sull'Adriatico, porta d'accesso al Salento.",
                    "BR",
                    "citta",
                ),
                capital(
                    "Taranto",
                    "La città dei due mari, con il borgo antico e il museo MArTA.",
                    "TA",
                    "citta",
                ),
                capital(
                    "Foggia",
                    "Capoluogo della Capitanata, crocevia tra il Gargano e i Monti Dauni.",
                    "FG",
                    "citta",
                ),
                capital(
                    "Trani",
                    "Elegante città di mare con la cattedrale romanica affacciata sul porto.",
                    "BT",
                    "citta",
                ),
                capital(
                    "Matera",
                    "La città dei Sassi, patrimonio UNESCO ai confini con la Puglia.",
                    "MT",
                    "citta",
                ),
                place(
                    "Monopoli",
                    "Porto storico e calette sulla costa adriatica, a sud di Bari.",
                    "BA",
                    "citta",
                ),
                place(
                    "Altamura",
                    "Città murgiana famosa per il pane DOP e la cattedrale federiciana.",
                    "BA",
                    "citta",
                ),
            ],
        },
        LocationGroup {
            category: "mare".to_string(),
            locations: vec![
                place(
                    "Polignano a Mare",
                    "Borgo a picco sul mare con Lama Monachile e le grotte marine.",
                    "BA",
                    "mare",
                ),
                // Listed again among the seaside spots; flattening keeps the
                // first occurrence from the city group.
                place(
                    "Monopoli",
                    "Spiagge e calette tra il porto vecchio e Capitolo.",
                    "BA",
                    "mare",
                ),
                place(
                    "Gallipoli",
                    "La città bella dello Ionio, tra il borgo antico e la Baia Verde.",
                    "LE",
                    "mare",
                ),
                place(
                    "Otranto",
                    "Il punto più a est d'Italia, con la cattedrale e i laghi Alimini.",
                    "LE",
                    "mare",
                ),
                place(
                    "Melendugno",
                    "Comune della costa adriatica salentina, da San Foca a Torre dell'Orso.",
                    "LE",
                    "mare",
                ),
                hamlet(
                    "Torre dell'Orso",
                    "Spiaggia di sabbia fine tra le Due Sorelle e la pineta, sulla costa di Melendugno.",
                    "LE",
                    "Melendugno",
                    "mare",
                ),
                place(
                    "Porto Cesareo",
                    "Mare caraibico e isole della riserva marina sullo Ionio.",
                    "LE",
                    "mare",
                ),
                place(
                    "Vieste",
                    "Perla del Gargano con il Pizzomunno e le spiagge bianche.",
                    "FG",
                    "mare",
                ),
                hamlet(
                    "Santa Maria di Leuca",
                    "De finibus terrae, dove lo Ionio incontra l'Adriatico.",
                    "LE",
                    "Castrignano del Capo",
                    "mare",
                ),
            ],
        },
        LocationGroup {
            category: "borghi".to_string(),
            locations: vec![
                place(
                    "Alberobello",
                    "Il paese dei trulli, patrimonio UNESCO nel cuore della Valle d'Itria.",
                    "BA",
                    "borghi",
                ),
                place(
                    "Ostuni",
                    "La città bianca su tre colli, affacciata sulla piana degli ulivi.",
                    "BR",
                    "borghi",
                ),
                place(
                    "Locorotondo",
                    "Borgo circolare tra i più belli d'Italia, con le cummerse bianche.",
                    "BA",
                    "borghi",
                ),
                place(
                    "Cisternino",
                    "Vicoli bianchi e fornelli pronti nel cuore della Valle d'Itria.",
                    "BR",
                    "borghi",
                ),
                place(
                    "Martina Franca",
                    "Barocco e festival della Valle d'Itria sull'altopiano murgiano.",
                    "TA",
                    "borghi",
                ),
                place(
                    "Ceglie Messapica",
                    "Capitale gastronomica della Valle d'Itria, tra masserie e trulli.",
                    "BR",
                    "borghi",
                ),
                place(
                    "Castrignano del Capo",
                    "Il comune di Santa Maria di Leuca, all'estremo capo del Salento.",
                    "LE",
                    "borghi",
                ),
            ],
        },
        LocationGroup {
            category: "aeroporti".to_string(),
            locations: vec![
                hamlet(
                    "Aeroporto di Bari",
                    "Lo scalo Karol Wojtyła di Bari Palese, principale aeroporto della Puglia.",
                    "BA",
                    "Bari",
                    "aeroporti",
                ),
                hamlet(
                    "Aeroporto di Brindisi",
                    "L'aeroporto del Salento, a pochi minuti dal centro di Brindisi.",
                    "BR",
                    "Brindisi",
                    "aeroporti",
                ),
            ],
        },
    ]
}

fn faq(question: &str, answer: &str) -> Faq {
    Faq {
        question: question.to_string(),
        answer: answer.to_string(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn builtin_services() -> ServiceCatalog {
    ServiceCatalog {
        ncc: ServiceConfig {
            title: "Servizio NCC a".to_string(),
            description: "Noleggio con conducente a {location} con auto di alta gamma e autisti professionisti, attivo 24 ore su 24.".to_string(),
            intro: "Cerchi un servizio di noleggio con conducente a {location}? I nostri autisti privati ti accompagnano ovunque con berline e minivan di alta gamma: transfer aeroportuali, spostamenti di lavoro, cerimonie ed eventi. Tariffe concordate in anticipo, senza sorprese.".to_string(),
            why_heading: "Perché scegliere il nostro NCC a {location}".to_string(),
            features_heading: "Cosa comprende il servizio NCC a {location}".to_string(),
            features: strings(&[
                "Disponibilità 24 ore su 24, 7 giorni su 7 a {location}",
                "Berline e minivan Mercedes con interni in pelle",
                "Autisti in divisa che parlano italiano e inglese",
                "Prezzo fisso concordato alla prenotazione",
                "Acqua, wi-fi e quotidiani a bordo",
                "Seggiolini per bambini su richiesta",
            ]),
            faqs: vec![
                faq(
                    "Quanto costa un NCC a {location}?",
                    "Il prezzo dipende dal percorso e dall'orario. Per {location} applichiamo tariffe fisse comunicate al momento della prenotazione, senza supplementi a sorpresa.",
                ),
                faq(
                    "Come prenoto un autista privato a {location}?",
                    "Puoi chiamarci, scriverci su WhatsApp o usare il modulo di contatto. Ti confermiamo disponibilità e prezzo entro pochi minuti.",
                ),
                faq(
                    "Il servizio NCC a {location} è attivo anche di notte?",
                    "Sì, lavoriamo 24 ore su 24 tutti i giorni dell'anno. Per le corse notturne consigliamo di prenotare con qualche ora di anticipo.",
                ),
                faq(
                    "Posso pagare con carta a bordo?",
                    "Certo, accettiamo carte, bancomat e pagamenti digitali, oltre al contante e al bonifico per le aziende.",
                ),
                faq(
                    "Quante persone può trasportare un vostro mezzo?",
                    "Le berline ospitano fino a 3 passeggeri, i minivan fino a 8. Per gruppi più numerosi a {location} organizziamo più vetture coordinate.",
                ),
                faq(
                    "Offrite servizi NCC continuativi per le aziende a {location}?",
                    "Sì, con convenzioni mensili, fatturazione unica e priorità di prenotazione per il personale aziendale.",
                ),
            ],
            keywords: strings(&[
                "ncc {location}",
                "noleggio con conducente {location}",
                "autista privato {location}",
                "auto blu {location}",
            ]),
        },
        transfer: ServiceConfig {
            title: "Transfer per".to_string(),
            description: "Transfer privati da e per {location} con monitoraggio dei voli, attesa inclusa e prezzo fisso.".to_string(),
            intro: "Arrivi in aeroporto o in stazione e vuoi raggiungere {location} senza pensieri? Il nostro transfer privato ti aspetta all'uscita con un cartello con il tuo nome, ti aiuta con i bagagli e ti porta a destinazione su una vettura recente e climatizzata.".to_string(),
            why_heading: "Perché prenotare il transfer per {location} con noi".to_string(),
            features_heading: "Il transfer per {location} include".to_string(),
            features: strings(&[
                "Monitoraggio del volo e attesa gratuita fino a 60 minuti",
                "Incontro in aeroporto con cartello nominativo",
                "Prezzo fisso per {location}, pedaggi e parcheggi inclusi",
                "Vetture igienizzate con ampio spazio bagagli",
                "Partenze da aeroporti, porti e stazioni di tutta la Puglia",
                "Assistenza telefonica in italiano e inglese",
            ]),
            faqs: vec![
                faq(
                    "Quanto dura il transfer dall'aeroporto di Bari a {location}?",
                    "La durata dipende dal traffico, ma l'autista sceglie sempre il percorso più rapido e ti comunica l'orario di arrivo stimato alla partenza.",
                ),
                faq(
                    "Cosa succede se il mio volo è in ritardo?",
                    "Monitoriamo il tuo volo in tempo reale: l'autista ti aspetta all'orario di atterraggio effettivo senza costi aggiuntivi.",
                ),
                faq(
                    "Il prezzo del transfer per {location} è a persona o a vettura?",
                    "Il prezzo è sempre a vettura: non cambia se viaggi da solo o con la tua famiglia, fino alla capienza del mezzo.",
                ),
                faq(
                    "Dove trovo l'autista all'arrivo?",
                    "All'uscita dell'area arrivi, con un cartello con il tuo nome. Ti inviamo comunque il contatto diretto dell'autista il giorno prima.",
                ),
                faq(
                    "Posso prenotare anche il ritorno verso l'aeroporto?",
                    "Sì, puoi prenotare andata e ritorno in un'unica richiesta: sul ritorno da {location} applichiamo uno sconto dedicato.",
                ),
                faq(
                    "Fornite seggiolini per bambini?",
                    "Sì, seggiolini e rialzi omologati sono disponibili gratuitamente, basta indicare l'età dei bambini alla prenotazione.",
                ),
            ],
            keywords: strings(&[
                "transfer {location}",
                "transfer aeroporto {location}",
                "taxi privato {location}",
                "navetta {location}",
            ]),
        },
        tour: ServiceConfig {
            title: "Tour di".to_string(),
            description: "Tour privato di {location} con autista dedicato, itinerari su misura e soste fotografiche.".to_string(),
            intro: "Scopri {location} con un tour privato in auto con autista: itinerario costruito sui tuoi ritmi, soste nei punti panoramici e i consigli di chi la Puglia la vive tutti i giorni. Ideale per coppie, famiglie e piccoli gruppi.".to_string(),
            why_heading: "Perché visitare {location} con un nostro tour".to_string(),
            features_heading: "Il tour di {location} comprende".to_string(),
            features: strings(&[
                "Itinerario personalizzato di mezza giornata o giornata intera",
                "Autista che conosce {location} e i dintorni",
                "Partenza dal tuo hotel, masseria o b&b",
                "Soste libere per foto, degustazioni e visite",
                "Possibilità di combinare più tappe nella stessa giornata",
                "Acqua fresca e wi-fi a bordo",
            ]),
            faqs: vec![
                faq(
                    "Quanto dura il tour di {location}?",
                    "Proponiamo formule di mezza giornata, circa 4 ore, o giornata intera, circa 8 ore. L'itinerario resta comunque flessibile.",
                ),
                faq(
                    "Il tour di {location} include una guida turistica?",
                    "L'autista ti accompagna e ti racconta il territorio, ma non è una guida abilitata. Su richiesta prenotiamo una guida autorizzata per i siti principali.",
                ),
                faq(
                    "Da dove parte il tour?",
                    "Da dove preferisci: hotel, masseria, porto o aeroporto. Il punto di partenza non cambia il prezzo se rientra nella zona concordata.",
                ),
                faq(
                    "Gli ingressi ai monumenti sono inclusi?",
                    "No, biglietti e degustazioni si pagano a parte. Ti aiutiamo però a prenotarli in anticipo per evitare le code.",
                ),
                faq(
                    "Posso modificare l'itinerario durante il tour?",
                    "Sì, il bello del tour privato è questo: l'autista adatta tappe e tempi alle tue preferenze anche in corso di giornata.",
                ),
                faq(
                    "Organizzate tour di {location} anche in inverno?",
                    "Sì, tutto l'anno. Fuori stagione {location} regala atmosfere più tranquille e molte strutture restano aperte.",
                ),
            ],
            keywords: strings(&[
                "tour {location}",
                "tour privato {location}",
                "escursione {location}",
                "visita guidata {location}",
            ]),
        },
        rental: ServiceConfig {
            title: "Noleggio Auto a".to_string(),
            description: "Noleggio auto a {location} con consegna in hotel, aeroporto o porto e chilometraggio illimitato.".to_string(),
            intro: "Preferisci guidare tu? Con il nostro noleggio auto a {location} ritiri la vettura dove vuoi: te la consegniamo in hotel, in aeroporto o al porto, con il pieno e le istruzioni per goderti la Puglia in libertà.".to_string(),
            why_heading: "Perché noleggiare un'auto a {location} da noi".to_string(),
            features_heading: "Il noleggio auto a {location} offre".to_string(),
            features: strings(&[
                "Consegna e ritiro a domicilio a {location}",
                "Chilometraggio illimitato su tutta la flotta",
                "Assicurazione kasko e assistenza stradale incluse",
                "Citycar, berline e suv recenti e climatizzati",
                "Nessun deposito cauzionale sulle formule base",
                "Tariffe scontate per noleggi settimanali",
            ]),
            faqs: vec![
                faq(
                    "Quali documenti servono per noleggiare un'auto a {location}?",
                    "Bastano patente valida da almeno un anno, documento d'identità e carta di credito o bancomat per l'eventuale deposito.",
                ),
                faq(
                    "Posso ritirare l'auto a {location} e riconsegnarla altrove?",
                    "Sì, il one way è disponibile in tutta la Puglia con un piccolo supplemento comunicato alla prenotazione.",
                ),
                faq(
                    "Il carburante è incluso nel noleggio?",
                    "La vettura viene consegnata con il pieno e va riconsegnata con il pieno. Su richiesta offriamo la formula prepagata.",
                ),
                faq(
                    "C'è un limite di età per il noleggio?",
                    "L'età minima è 21 anni; sotto i 25 si applica un piccolo supplemento giovane guidatore.",
                ),
                faq(
                    "Cosa succede in caso di guasto?",
                    "L'assistenza stradale è inclusa 24 ore su 24: interveniamo noi e, se serve, ti sostituiamo la vettura a {location}.",
                ),
                faq(
                    "Posso aggiungere un secondo guidatore?",
                    "Sì, il secondo guidatore è gratuito su tutte le tariffe, basta registrarlo al momento del ritiro.",
                ),
            ],
            keywords: strings(&[
                "noleggio auto {location}",
                "autonoleggio {location}",
                "affitto auto {location}",
                "noleggio settimanale {location}",
            ]),
        },
    }
}

fn builtin_advantages() -> Vec<Advantage> {
    let entries = [
        (
            "Esperienza locale",
            "Lavoriamo in Puglia da oltre dieci anni e conosciamo ogni strada che porta a {location}.",
        ),
        (
            "Puntualità garantita",
            "Monitoriamo traffico e voli in tempo reale per farti arrivare a {location} sempre in orario.",
        ),
        (
            "Prezzi trasparenti",
            "Il preventivo per {location} è fisso e definitivo: nessun costo nascosto alla fine della corsa.",
        ),
        (
            "Flotta curata",
            "Vetture recenti, igienizzate e controllate prima di ogni servizio verso {location}.",
        ),
        (
            "Assistenza continua",
            "Un referente dedicato risponde a telefono e WhatsApp prima, durante e dopo il viaggio.",
        ),
        (
            "Pagamenti flessibili",
            "Carte, bonifico o contanti: scegli tu come saldare il servizio a {location}.",
        ),
    ];

    entries
        .iter()
        .map(|(title, description)| Advantage {
            title: title.to_string(),
            description: description.to_string(),
        })
        .collect()
}
